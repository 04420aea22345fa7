//! Command enumerations for every IR-controlled appliance
//!
//! Each command has a fixed wire name that doubles as the suffix of its
//! resource file (`<prefix>_<name>.txt`). Names are validated once at the
//! routing boundary; the core only ever sees these closed enums.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::errors::ParseCommandError;

/// Appliance driven by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Light,
    Ac,
}

impl Device {
    /// Resource file prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            Device::Light => "light",
            Device::Ac => "ac",
        }
    }

    /// Human-readable name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Device::Light => "Light",
            Device::Ac => "AC",
        }
    }

    /// What a single command of this device is called in responses
    /// (`mode` for lights, `action` for the AC).
    pub fn subject(&self) -> &'static str {
        match self {
            Device::Light => "mode",
            Device::Ac => "action",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Command category, one per enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Light,
    AcMode,
    AcTemp,
    AcTimer,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Light => "light mode",
            Category::AcMode => "AC mode",
            Category::AcTemp => "temperature control",
            Category::AcTimer => "timer control",
        }
    }

    /// Literal command names of this category, in declaration order
    pub fn commands(&self) -> Vec<&'static str> {
        match self {
            Category::Light => names(LightMode::ALL),
            Category::AcMode => names(AcMode::ALL),
            Category::AcTemp => names(AcTempControl::ALL),
            Category::AcTimer => names(AcTimerControl::ALL),
        }
    }

    fn success_message(&self, value: &str) -> String {
        match self {
            Category::Light => format!("Light set to {} mode successfully", value),
            Category::AcMode => format!("AC set to {} mode successfully", value),
            Category::AcTemp => format!("Temperature control {} executed successfully", value),
            Category::AcTimer => format!("Timer control {} executed successfully", value),
        }
    }
}

/// Discovery helper: every command name available in `category`
pub fn list_available(category: Category) -> Vec<&'static str> {
    category.commands()
}

fn names<C: IrCommand>(all: &[C]) -> Vec<&'static str> {
    all.iter().map(|c| c.as_str()).collect()
}

/// A symbolic command that maps to exactly one resource file
pub trait IrCommand: Copy + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const CATEGORY: Category;

    /// Wire name, also the resource file suffix
    fn as_str(&self) -> &'static str;

    fn success_message(&self) -> String {
        Self::CATEGORY.success_message(self.as_str())
    }
}

/// Accepts both the wire name (`all_bright`) and the URL form (`all-bright`).
fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

macro_rules! ir_command {
    (
        $(#[$meta:meta])*
        $name:ident: $category:expr => {
            $($variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl IrCommand for $name {
            const CATEGORY: Category = $category;

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseCommandError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.as_str() == wanted)
                    .ok_or_else(|| ParseCommandError::new($category, s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

ir_command! {
    /// Ceiling light modes
    LightMode: Category::Light => {
        AllBright = "all_bright",
        Bright = "bright",
        Dark = "dark",
        Off = "off",
        On = "on",
    }
}

ir_command! {
    /// Air conditioner operating modes
    AcMode: Category::AcMode => {
        AirconOn = "aircon_on",
        HeaterOn = "heater_on",
        Off = "off",
    }
}

ir_command! {
    AcTempControl: Category::AcTemp => {
        AirconTempUp = "aircon_temp_up",
        HeaterTempUp = "heater_temp_up",
        HeaterTempDown = "heater_temp_down",
    }
}

ir_command! {
    AcTimerControl: Category::AcTimer => {
        TimerOn = "timer_on",
        TimerUp = "timer_up",
        TimerDown = "timer_down",
    }
}

/// Any AC command, used where the category is only known at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcCommand {
    Mode(AcMode),
    Temp(AcTempControl),
    Timer(AcTimerControl),
}

impl FromStr for AcCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(mode) = s.parse::<AcMode>() {
            return Ok(AcCommand::Mode(mode));
        }
        if let Ok(temp) = s.parse::<AcTempControl>() {
            return Ok(AcCommand::Temp(temp));
        }
        s.parse::<AcTimerControl>()
            .map(AcCommand::Timer)
            .map_err(|_| ParseCommandError::any_ac(s))
    }
}

impl AcCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcCommand::Mode(c) => c.as_str(),
            AcCommand::Temp(c) => c.as_str(),
            AcCommand::Timer(c) => c.as_str(),
        }
    }
}

impl fmt::Display for AcCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
