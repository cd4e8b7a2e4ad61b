use crate::errors::AppError;
use crate::params::{Preset, PresetInfo};

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Interactive,
    Theory,
    Tutorial,
    Labs,
    About,
}

impl Panel {
    pub const TABS: [Panel; 4] = [Panel::Interactive, Panel::Theory, Panel::Tutorial, Panel::Labs];

    pub fn title(self) -> &'static str {
        match self {
            Self::Interactive => "Interactive Tool",
            Self::Theory => "Theory Behind VIX",
            Self::Tutorial => "Comprehensive Tutorial",
            Self::Labs => "Practical Labs",
            Self::About => "Disclaimer and License",
        }
    }
}

impl std::str::FromStr for Panel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" | "tool" => Ok(Self::Interactive),
            "theory" => Ok(Self::Theory),
            "tutorial" => Ok(Self::Tutorial),
            "labs" => Ok(Self::Labs),
            "about" | "disclaimer" | "license" => Ok(Self::About),
            _ => Err(AppError::UnknownPanel(s.to_string())),
        }
    }
}

/// Static markdown content of a non-computed panel.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StaticPanel {
    pub panel: Panel,
    pub title: &'static str,
    pub markdown: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labs: Vec<PresetInfo>,
}

pub const INTRO: &str = r#"The **VIX Index** measures market expectations of near-term volatility based on S&P 500 options. It is often called the "fear gauge" because it spikes during periods of market uncertainty.

$$
\text{VIX} \propto \sigma_{\text{implied}}
$$

- $\sigma_{\text{implied}}$: implied volatility derived from option prices.
- High VIX: high expected volatility (uncertainty).
- Low VIX: low expected volatility (calm markets)."#;

// Displayed only. The service never evaluates this formula.
const THEORY: &str = r#"## Volatility Index (VIX): Mathematical Foundation

### Overview
The VIX measures implied volatility derived from S&P 500 index options. It reflects market expectations of 30-day forward-looking volatility.
- High VIX: fear or uncertainty in the market.
- Low VIX: calm and stability.

### Core Equation

$$
\text{VIX} \approx \sqrt{\frac{2}{T} \sum_{i} \frac{\Delta K_i}{K_i^2} e^{rT} Q(K_i) - \frac{1}{T} \left( \frac{F}{K_0} - 1 \right)^2}
$$

Where:
- $T$: time to expiration.
- $K_i$: strike price of the $i$-th option.
- $Q(K_i)$: midpoint of the bid-ask spread for each option.
- $F$: forward index level.
- $r$: risk-free rate.

### Key Insights
- **Implied Volatility**: reflects market sentiment about future price movements.
- **Fear Gauge**: spikes during market downturns or crises.
- **Contrarian Indicator**: extremely high VIX levels may signal oversold conditions.

### What this tool computes
The interactive tool uses a deliberately simple linear model:

$$
R_{adj} = E(R_m) - \frac{\text{VIX}}{100} \times \beta_{vol}
$$"#;

const TUTORIAL: &str = r#"## Welcome to the VIX Learning Tool!

**What this tool does:**
This interactive calculator helps you understand how the VIX Index impacts market sentiment and expected returns.

### Quick Start Guide

1. **Adjust Parameters** (sidebar): move the sliders to set VIX level, market return and volatility impact factor.
2. **View Results** (Interactive Tool): real-time adjusted market return and a chart of the VIX impact on returns.
3. **Try These Examples**:
   - Set VIX = 40: notice how market returns drop due to high volatility.
   - Set VIX = 15: see how calm markets boost confidence.
   - Compare VIX = 20 vs VIX = 30: observe sensitivity to volatility changes.

**Pro Tip:** use the reset button to quickly return to default values!"#;

const LABS: &str = r#"## Practical VIX Labs

Each lab provides a real-world scenario to help you apply the VIX concept in a hands-on way.

Use the **"Set Lab Parameters"** buttons to jump directly to recommended settings for each scenario. Experiment, take notes, and explore how volatility impacts markets!"#;

const LABS_WARNING: &str = "This material is purely for educational purposes. Do not use this tool \
for financial decisions without consulting a qualified professional.";

const ABOUT: &str = r#"**Important Legal Disclaimer**

This tool is purely for educational purposes. No accuracy guarantees are provided.
The author does not engage in financial advising or endorse any specific investment strategies.
All information provided is for illustrative and educational purposes only.

**License:** Creative Commons Attribution-NonCommercial 4.0 International
(https://creativecommons.org/licenses/by-nc/4.0/)."#;

/// Content for a static panel. `Interactive` is computed per request and
/// has no static form.
pub fn static_panel(panel: Panel) -> Option<StaticPanel> {
    let (markdown, warning, labs) = match panel {
        Panel::Interactive => return None,
        Panel::Theory => (THEORY, None, Vec::new()),
        Panel::Tutorial => (TUTORIAL, None, Vec::new()),
        Panel::Labs => (
            LABS,
            Some(LABS_WARNING),
            Preset::LABS.into_iter().map(PresetInfo::from).collect(),
        ),
        Panel::About => (ABOUT, None, Vec::new()),
    };

    Some(StaticPanel {
        panel,
        title: panel.title(),
        markdown,
        warning,
        labs,
    })
}
