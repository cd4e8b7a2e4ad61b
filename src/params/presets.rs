use super::Parameters;
use crate::errors::AppError;

/// Named, immutable parameter triples used by the reset and lab buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Default,
    Lab1,
    Lab2,
    Lab3,
}

/// Teaching notes shown next to a lab's "Set Lab Parameters" button.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct LabGuide {
    pub title: &'static str,
    pub scenario: &'static str,
    pub objectives: &'static [&'static str],
    pub steps: &'static [&'static str],
}

const LAB1_GUIDE: LabGuide = LabGuide {
    title: "Lab 1: Market Downturn and VIX Spike",
    scenario: "During a market crash, the VIX spikes as investors panic. \
               How does this affect market returns?",
    objectives: &[
        "Understand the relationship between VIX spikes and market sentiment.",
        "Analyze the impact of high volatility on returns.",
    ],
    steps: &[
        "Click \"Set Lab 1 Parameters\" to use VIX = 30, E(R_m) = -5%, Volatility Impact = 1.5.",
        "Observe the adjusted market return.",
        "Increase VIX to 40. Repeat the analysis.",
    ],
};

const LAB2_GUIDE: LabGuide = LabGuide {
    title: "Lab 2: Calm Markets and Low VIX",
    scenario: "In calm markets, the VIX remains low. \
               How does this affect investor confidence and returns?",
    objectives: &[
        "Explore the relationship between low VIX and positive market sentiment.",
        "Understand why low volatility boosts returns.",
    ],
    steps: &[
        "Click \"Set Lab 2 Parameters\" to use VIX = 15, E(R_m) = 10%, Volatility Impact = 0.8.",
        "Observe the adjusted market return.",
        "Decrease VIX to 10. Repeat the analysis.",
    ],
};

const LAB3_GUIDE: LabGuide = LabGuide {
    title: "Lab 3: Extreme Volatility",
    scenario: "During extreme events (e.g., financial crises), the VIX can reach \
               unprecedented levels. How does this impact markets?",
    objectives: &[
        "Understand the role of extreme volatility in market crashes.",
        "Analyze the potential for contrarian opportunities.",
    ],
    steps: &[
        "Click \"Set Lab 3 Parameters\" to use VIX = 40, E(R_m) = -10%, Volatility Impact = 2.0.",
        "Observe the adjusted market return.",
        "Simulate recovery by reducing VIX to 20. Repeat the analysis.",
    ],
};

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Default, Preset::Lab1, Preset::Lab2, Preset::Lab3];
    pub const LABS: [Preset; 3] = [Preset::Lab1, Preset::Lab2, Preset::Lab3];

    pub const fn parameters(self) -> Parameters {
        match self {
            Self::Default => Parameters::new(20.0, 0.08, 1.0),
            Self::Lab1 => Parameters::new(30.0, -0.05, 1.5),
            Self::Lab2 => Parameters::new(15.0, 0.10, 0.8),
            Self::Lab3 => Parameters::new(40.0, -0.10, 2.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Lab1 => "lab1",
            Self::Lab2 => "lab2",
            Self::Lab3 => "lab3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Lab1 => "Lab 1: Market Downturn",
            Self::Lab2 => "Lab 2: Calm Markets",
            Self::Lab3 => "Lab 3: Extreme Volatility",
        }
    }

    /// Lab presets carry a guide; the default preset does not.
    pub fn guide(self) -> Option<&'static LabGuide> {
        match self {
            Self::Default => None,
            Self::Lab1 => Some(&LAB1_GUIDE),
            Self::Lab2 => Some(&LAB2_GUIDE),
            Self::Lab3 => Some(&LAB3_GUIDE),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Preset {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "default" | "reset" => Ok(Self::Default),
            "lab1" | "downturn" | "marketdownturn" => Ok(Self::Lab1),
            "lab2" | "calm" | "calmmarkets" => Ok(Self::Lab2),
            "lab3" | "extreme" | "extremevolatility" => Ok(Self::Lab3),
            _ => Err(AppError::UnknownPreset(s.to_string())),
        }
    }
}

/// Serializable view of a preset for the dashboard's preset list.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PresetInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub parameters: Parameters,
    pub guide: Option<&'static LabGuide>,
}

impl From<Preset> for PresetInfo {
    fn from(p: Preset) -> Self {
        Self {
            name: p.name(),
            label: p.label(),
            parameters: p.parameters(),
            guide: p.guide(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        assert_eq!(Preset::Default.parameters(), Parameters::new(20.0, 0.08, 1.0));
        assert_eq!(Preset::Lab1.parameters(), Parameters::new(30.0, -0.05, 1.5));
        assert_eq!(Preset::Lab2.parameters(), Parameters::new(15.0, 0.10, 0.8));
        assert_eq!(Preset::Lab3.parameters(), Parameters::new(40.0, -0.10, 2.0));
    }

    #[test]
    fn test_all_presets_in_range() {
        for p in Preset::ALL {
            assert!(p.parameters().in_range(), "{p} out of range");
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("downturn".parse::<Preset>().unwrap(), Preset::Lab1);
        assert_eq!("Calm Markets".parse::<Preset>().unwrap(), Preset::Lab2);
        assert_eq!("lab-3".parse::<Preset>().unwrap(), Preset::Lab3);
        assert!("lab4".parse::<Preset>().is_err());
    }

    #[test]
    fn test_only_labs_have_guides() {
        assert!(Preset::Default.guide().is_none());
        for p in Preset::LABS {
            let guide = p.guide().unwrap();
            assert_eq!(guide.steps.len(), 3);
        }
    }
}
