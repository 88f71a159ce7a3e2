//! Single HTML template shared by every page variant.
//!
//! The document is static for a given `(variant, target)` pair: the live
//! countdown runs in the embedded script, which mirrors `y2k38_core`'s
//! decomposition and tick state machine on the client.

use serde::Serialize;
use y2k38_core::format::TERMINAL_LABEL_WIDTH;
use y2k38_core::{FirstSample, TICK_INTERVAL_MILLIS, TargetInstant, Unit, UtcDateTime};

use crate::variant::Variant;

/// Response content type for the rendered document.
pub const CONTENT_TYPE: &str = "text/html;charset=UTF-8";

const DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Countdown to Y2K38</title>
  __HEAD_LINKS__
  <style>__STYLE__</style>
</head>
<body>
  <div id="countdown-container">
    <h1>__HEADING__</h1>
    <div id="countdown">
      __PLACEHOLDER__
    </div>
    <p>__FOOTNOTE__</p>
  </div>

  <script>
__SCRIPT__
  </script>
</body>
</html>
"#;

const SCRIPT: &str = r#"    const targetEpochTime = __TARGET__;
    const tickIntervalMillis = __INTERVAL__;
    const segmentUnits = __UNITS__;
    const reachedMessage = __REACHED__;
    const countdownElement = document.getElementById('countdown');
    let intervalId = null;

    function splitDifference(difference) {
      const seconds = Math.floor((difference / 1000) % 60);
      const minutes = Math.floor((difference / (1000 * 60)) % 60);
      const hours = Math.floor((difference / (1000 * 60 * 60)) % 24);
      const totalDays = Math.floor(difference / (1000 * 60 * 60 * 24));
      const hasYears = segmentUnits.some((u) => u.key === 'years');
      const values = {
        years: Math.floor(totalDays / 365),
        days: hasYears ? totalDays % 365 : totalDays,
        hours: hours,
        minutes: minutes,
        seconds: seconds,
      };
      return segmentUnits.map((u) => ({
        label: u.label,
        value: u.padded ? String(values[u.key]).padStart(2, '0') : String(values[u.key]),
      }));
    }

__RENDERERS__

    function updateCountdown() {
      const difference = targetEpochTime - Date.now();
      if (difference <= 0) {
        renderReached();
        if (intervalId !== null) {
          clearInterval(intervalId);
          intervalId = null;
        }
        return false;
      }
      renderSegments(splitDifference(difference));
      return true;
    }

__START__"#;

const TERMINAL_RENDERERS: &str = r#"    function renderSegments(segments) {
      countdownElement.textContent = segments
        .map((s) => s.label.padEnd(__LABEL_WIDTH__, ' ') + ': ' + s.value + '\n')
        .join('');
      countdownElement.classList.remove('loading-text');
    }

    function renderReached() {
      countdownElement.textContent = reachedMessage;
      countdownElement.classList.remove('loading-text');
    }"#;

const CARD_RENDERERS: &str = r#"    function renderSegments(segments) {
      countdownElement.innerHTML = segments
        .map((s) => '<div class="time-segment">'
          + '<span class="time-value">' + s.value + '</span>'
          + '<span class="time-label">' + s.label + '</span>'
          + '</div>')
        .join('');
    }

    function renderReached() {
      const message = document.createElement('span');
      message.className = 'text-2xl text-green-400';
      message.textContent = reachedMessage;
      countdownElement.replaceChildren(message);
      countdownElement.style.display = 'block';
    }"#;

const START_IMMEDIATE: &str = r#"    if (updateCountdown()) {
      intervalId = setInterval(updateCountdown, tickIntervalMillis);
    }"#;

const START_ON_FIRST_TICK: &str =
    r#"    intervalId = setInterval(updateCountdown, tickIntervalMillis);"#;

#[derive(Serialize)]
struct UnitSpec {
    key: Unit,
    label: String,
    padded: bool,
}

/// Render the full HTML document for `variant`, counting down to `target`.
pub fn render(variant: Variant, target: TargetInstant) -> String {
    DOCUMENT
        .replace("__HEAD_LINKS__", variant.head_links())
        .replace("__STYLE__", variant.stylesheet())
        .replace("__HEADING__", &heading(variant, target))
        .replace("__PLACEHOLDER__", variant.placeholder())
        .replace("__FOOTNOTE__", &footnote(variant, target))
        .replace("__SCRIPT__", &script(variant, target))
}

fn script(variant: Variant, target: TargetInstant) -> String {
    let units: Vec<UnitSpec> = variant
        .policy()
        .units()
        .iter()
        .map(|&unit| UnitSpec {
            key: unit,
            label: variant.label(unit),
            padded: unit.is_padded(),
        })
        .collect();

    let renderers = match variant {
        Variant::Terminal => {
            TERMINAL_RENDERERS.replace("__LABEL_WIDTH__", &TERMINAL_LABEL_WIDTH.to_string())
        }
        Variant::Card => CARD_RENDERERS.to_string(),
    };
    let start = match variant.first_sample() {
        FirstSample::Immediate => START_IMMEDIATE,
        FirstSample::OnFirstTick => START_ON_FIRST_TICK,
    };

    SCRIPT
        .replace("__TARGET__", &target.as_millis().to_string())
        .replace("__INTERVAL__", &TICK_INTERVAL_MILLIS.to_string())
        .replace("__UNITS__", &json_literal(&units))
        .replace("__REACHED__", &json_literal(variant.reached_message()))
        .replace("__RENDERERS__", &renderers)
        .replace("__START__", start)
}

fn heading(variant: Variant, target: TargetInstant) -> String {
    match variant {
        Variant::Terminal => "System Monitor: Y2K38 Event".to_string(),
        Variant::Card => format!(
            "Countdown to {}",
            UtcDateTime::from_unix_millis(target.as_millis()).to_long_form()
        ),
    }
}

fn footnote(variant: Variant, target: TargetInstant) -> String {
    match variant {
        Variant::Terminal => {
            // last representable second before the rollover
            let last = UtcDateTime::from_unix_millis(target.as_millis().saturating_sub(1000))
                .to_long_form();
            format!(
                "&gt; The Y2K38 problem refers to the time encoding limit in many 32-bit systems at {last}."
            )
        }
        Variant::Card => "This is the moment many 32-bit systems may encounter the \"Year 2038 problem\" if not updated.".to_string(),
    }
}

/// JSON is valid JS; `</` is escaped so nothing can close the script element early.
///
/// Only strings, bools and unit enum variants reach this, and serde_json can
/// fail on those only through non-string map keys or a failing custom
/// `Serialize`, neither of which exists here. `null` is kept as the fallback
/// so a broken literal degrades to a script error instead of a panic.
fn json_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}
