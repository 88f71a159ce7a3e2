use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use y2k38_core::{FirstSample, ParseError, Policy, Unit};

/// Visual flavour of the countdown page. Each variant fixes its own
/// decomposition policy and first-sample behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Green-on-black monospace "system monitor", days/h/m/s as text lines.
    Terminal,
    /// Styled dark card, years/days/h/m/s as blocks.
    #[default]
    Card,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Terminal, Variant::Card];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Terminal => "terminal",
            Variant::Card => "card",
        }
    }

    pub fn policy(self) -> Policy {
        match self {
            Variant::Terminal => Policy::Days,
            Variant::Card => Policy::Years,
        }
    }

    /// The terminal page keeps its loading banner until the first interval tick.
    pub fn first_sample(self) -> FirstSample {
        match self {
            Variant::Terminal => FirstSample::OnFirstTick,
            Variant::Card => FirstSample::Immediate,
        }
    }

    pub fn label(self, unit: Unit) -> String {
        match self {
            Variant::Terminal => unit.label().to_ascii_uppercase(),
            Variant::Card => unit.label().to_string(),
        }
    }

    /// Plain-text message shown once the target has been reached.
    pub fn reached_message(self) -> &'static str {
        match self {
            Variant::Terminal => "> Y2K38 THRESHOLD REACHED.\n> CHECK SYSTEM STATUS IMMEDIATELY.",
            Variant::Card => "The Y2K38 moment has arrived!",
        }
    }

    pub(crate) fn head_links(self) -> &'static str {
        match self {
            Variant::Terminal => "",
            Variant::Card => concat!(
                r#"<script src="https://cdn.tailwindcss.com"></script>"#,
                "\n  ",
                r#"<link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700&display=swap" rel="stylesheet">"#,
            ),
        }
    }

    pub(crate) fn placeholder(self) -> &'static str {
        match self {
            Variant::Terminal => {
                r#"<span class="loading-text">INITIALIZING COUNTDOWN SEQUENCE...</span>"#
            }
            Variant::Card => "Loading...",
        }
    }

    pub(crate) fn stylesheet(self) -> &'static str {
        match self {
            Variant::Terminal => TERMINAL_CSS,
            Variant::Card => CARD_CSS,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" => Ok(Variant::Terminal),
            "card" => Ok(Variant::Card),
            _ => Err(ParseError::UnknownVariant(s.to_string())),
        }
    }
}

const TERMINAL_CSS: &str = r#"
    body {
      font-family: 'Monaco', 'Lucida Console', monospace;
      background-color: #000000;
      color: #66FF66;
      display: flex;
      justify-content: center;
      align-items: center;
      min-height: 100vh;
      margin: 0;
      padding: 1em;
      box-sizing: border-box;
    }
    #countdown-container {
      border: 1px solid #66FF66;
      padding: 1.5em 2em;
      min-width: 300px;
      max-width: 90%;
      text-align: left;
      box-shadow: 0 0 10px #66FF66;
    }
    h1 {
      font-family: inherit;
      font-size: 0.9em;
      margin: 0 0 1em 0;
      padding-bottom: 0.5em;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      text-align: center;
      border-top: 1px solid #66FF66;
      border-bottom: 1px solid #66FF66;
    }
    #countdown {
      font-size: 0.9em;
      line-height: 1.8;
      white-space: pre;
      margin: 1em 0;
    }
    p {
      font-size: 0.8em;
      line-height: 1.6;
      margin: 1em 0 0 0;
    }
    .loading-text::after {
      content: '_';
      animation: blink 1s step-start infinite;
      margin-left: 2px;
    }
    @keyframes blink {
      0%, 100% { opacity: 1; }
      50% { opacity: 0; }
    }
"#;

const CARD_CSS: &str = r#"
    body {
      font-family: 'Inter', sans-serif;
      display: flex;
      justify-content: center;
      align-items: center;
      min-height: 100vh;
      margin: 0;
      background-color: #44a33c;
      color: #e2e8f0;
      text-align: center;
      padding: 1rem;
    }
    #countdown-container {
      background-color: #2d3748;
      padding: 2rem 1.5rem;
      border-radius: 0.75rem;
      box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05);
      max-width: 700px;
      width: 100%;
    }
    h1 {
      font-size: 1.875rem;
      line-height: 2.25rem;
      font-weight: 700;
      margin-bottom: 1.5rem;
      color: #63b3ed;
    }
    #countdown {
      font-weight: 600;
      color: #f7fafc;
      margin-bottom: 1.5rem;
      letter-spacing: 0.025em;
      display: flex;
      flex-wrap: wrap;
      justify-content: center;
      gap: 0.5rem;
    }
    .time-segment { min-width: 90px; padding: 0.5rem; }
    .time-value { display: block; font-size: 2rem; font-weight: 700; }
    .time-label { display: block; font-size: 0.75rem; color: #a0aec0; margin-top: 0.25rem; }
    p {
      font-size: 0.875rem;
      line-height: 1.25rem;
      color: #a0aec0;
      margin-top: 1.5rem;
    }
    @media (max-width: 640px) {
      h1 { font-size: 1.5rem; }
      #countdown-container { padding: 1.5rem 1rem; }
      .time-segment { min-width: 60px; padding: 0.25rem; }
      .time-value { font-size: 1.5rem; }
      .time-label { font-size: 0.65rem; }
    }
    @media (max-width: 420px) {
      .time-segment { min-width: 50px; flex-basis: calc(33.33% - 1rem); }
      .time-value { font-size: 1.25rem; }
    }
"#;
