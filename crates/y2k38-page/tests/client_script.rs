//! Runs the countdown script embedded in each rendered page inside a JS engine.
//! The browser surface the script touches (`document`, `Date.now`,
//! `setInterval`, `clearInterval`) is replaced by a recording stub, and the
//! clock only moves when a test fires the timers.

use boa_engine::{Context, JsValue, Source};
use y2k38_core::{Policy, TargetInstant, decompose, terminal_lines};
use y2k38_page::{Variant, render};

const TARGET: i64 = 2_147_483_648_000;
const DAY: i64 = 86_400_000;

const TERMINAL_REACHED: &str = "> Y2K38 THRESHOLD REACHED.\n> CHECK SYSTEM STATUS IMMEDIATELY.";
const CARD_REACHED: &str = "The Y2K38 moment has arrived!";

const BROWSER_STUB: &str = r#"
var clock = 0;
var scheduled = [];
var cleared = [];
var active = [];

Date.now = function () { return clock; };

function setInterval(callback, delay) {
  scheduled.push(delay);
  var id = scheduled.length;
  active.push({ id: id, callback: callback });
  return id;
}

function clearInterval(id) {
  cleared.push(id);
  active = active.filter(function (t) { return t.id !== id; });
}

function fireTimers() {
  active.slice().forEach(function (t) { t.callback(); });
}

var element = {
  textContent: '',
  innerHTML: '',
  style: {},
  removedClasses: [],
  classList: {
    remove: function (name) { element.removedClasses.push(name); },
  },
  replaceChildren: function (child) {
    element.innerHTML = '';
    element.textContent = child.textContent;
  },
};

var document = {
  getElementById: function (id) { return id === 'countdown' ? element : null; },
  createElement: function (tag) { return { tagName: tag, className: '', textContent: '' }; },
};
"#;

/// A rendered page whose script has been loaded at a fixed clock reading.
struct LoadedPage {
    context: Context,
}

impl LoadedPage {
    fn load(variant: Variant, now: i64) -> Self {
        let html = render(variant, TargetInstant::Y2K38);
        let source = format!("{BROWSER_STUB}\nclock = {now};\n{}", inline_script(&html));
        let mut context = Context::default();
        context.eval(Source::from_bytes(&source)).unwrap();
        Self { context }
    }

    fn eval(&mut self, code: &str) -> JsValue {
        self.context.eval(Source::from_bytes(code)).unwrap()
    }

    fn string(&mut self, code: &str) -> String {
        let value = self.eval(code);
        value
            .to_string(&mut self.context)
            .unwrap()
            .to_std_string_escaped()
    }

    fn count(&mut self, code: &str) -> usize {
        let value = self.eval(code);
        value.to_number(&mut self.context).unwrap() as usize
    }

    /// Set the clock and fire every interval that is still scheduled.
    fn tick_at(&mut self, now: i64) {
        self.eval(&format!("clock = {now}; fireTimers();"));
    }

    fn text(&mut self) -> String {
        self.string("element.textContent")
    }

    fn inner_html(&mut self) -> String {
        self.string("element.innerHTML")
    }

    fn scheduled(&mut self) -> usize {
        self.count("scheduled.length")
    }

    fn cleared(&mut self) -> usize {
        self.count("cleared.length")
    }

    fn active(&mut self) -> usize {
        self.count("active.length")
    }
}

/// Body of the page's own script element; the card head also pulls in an
/// external script, so the last one is taken.
fn inline_script(html: &str) -> &str {
    let start = html.rfind("<script>").expect("inline script") + "<script>".len();
    let end = start + html[start..].find("</script>").expect("closing script tag");
    &html[start..end]
}

fn card_blocks(segments: &[(&str, &str)]) -> String {
    segments
        .iter()
        .map(|(value, label)| {
            format!(
                r#"<div class="time-segment"><span class="time-value">{value}</span><span class="time-label">{label}</span></div>"#
            )
        })
        .collect()
}

#[test]
fn terminal_waits_for_first_tick() {
    let mut page = LoadedPage::load(Variant::Terminal, TARGET - 90_061_000);
    assert_eq!(page.text(), "");
    assert_eq!(page.scheduled(), 1);
    assert_eq!(page.count("scheduled[0]"), 1000);

    page.tick_at(TARGET - 90_061_000);
    assert_eq!(
        page.text(),
        "DAYS    : 1\nHOURS   : 01\nMINUTES : 01\nSECONDS : 01\n"
    );
    assert_eq!(page.string("element.removedClasses.join()"), "loading-text");
}

#[test]
fn terminal_days_are_unbounded() {
    let now = TARGET - (400 * DAY + 5000);
    let mut page = LoadedPage::load(Variant::Terminal, now);
    page.tick_at(now);
    assert_eq!(
        page.text(),
        "DAYS    : 400\nHOURS   : 00\nMINUTES : 00\nSECONDS : 05\n"
    );
}

#[test]
fn card_samples_on_load() {
    let mut page = LoadedPage::load(Variant::Card, TARGET - 90_061_000);
    assert_eq!(
        page.inner_html(),
        card_blocks(&[
            ("0", "Years"),
            ("1", "Days"),
            ("01", "Hours"),
            ("01", "Minutes"),
            ("01", "Seconds"),
        ])
    );
    assert_eq!(page.scheduled(), 1);
    assert_eq!(page.cleared(), 0);
}

#[test]
fn card_uses_365_day_years() {
    let mut page = LoadedPage::load(Variant::Card, TARGET - (400 * DAY + 5000));
    assert_eq!(
        page.inner_html(),
        card_blocks(&[
            ("1", "Years"),
            ("35", "Days"),
            ("00", "Hours"),
            ("00", "Minutes"),
            ("05", "Seconds"),
        ])
    );
}

#[test]
fn terminal_reached_at_and_after_target() {
    for now in [TARGET, TARGET + 1] {
        let mut page = LoadedPage::load(Variant::Terminal, now);
        page.tick_at(now);
        assert_eq!(page.text(), TERMINAL_REACHED, "now = {now}");
        assert_eq!(page.cleared(), 1);
        assert_eq!(page.active(), 0);

        // the interval is gone, so nothing runs or clears again
        page.tick_at(now + 1000);
        page.tick_at(now + 2000);
        assert_eq!(page.text(), TERMINAL_REACHED);
        assert_eq!(page.cleared(), 1);
    }
}

#[test]
fn terminal_counts_down_then_clears_once() {
    let mut page = LoadedPage::load(Variant::Terminal, TARGET - 2500);

    page.tick_at(TARGET - 2500);
    assert!(page.text().ends_with("SECONDS : 02\n"));
    page.tick_at(TARGET - 1500);
    assert!(page.text().ends_with("SECONDS : 01\n"));
    page.tick_at(TARGET - 500);
    assert_eq!(
        page.text(),
        "DAYS    : 0\nHOURS   : 00\nMINUTES : 00\nSECONDS : 00\n"
    );
    assert_eq!(page.cleared(), 0);

    page.tick_at(TARGET + 500);
    assert_eq!(page.text(), TERMINAL_REACHED);
    assert_eq!(page.cleared(), 1);
    assert_eq!(page.count("cleared[0]"), 1);

    page.tick_at(TARGET + 1500);
    assert_eq!(page.cleared(), 1);
    assert_eq!(page.scheduled(), 1);
}

#[test]
fn card_started_past_target_never_schedules() {
    for now in [TARGET, TARGET + 1] {
        let mut page = LoadedPage::load(Variant::Card, now);
        assert_eq!(page.scheduled(), 0, "now = {now}");
        assert_eq!(page.cleared(), 0);
        assert_eq!(page.text(), CARD_REACHED);
        assert_eq!(page.inner_html(), "");
        assert_eq!(page.string("element.style.display"), "block");
    }
}

#[test]
fn card_reaches_target_while_running() {
    let mut page = LoadedPage::load(Variant::Card, TARGET - 1000);
    assert!(page.inner_html().contains(r#"<span class="time-value">01</span><span class="time-label">Seconds</span>"#));

    page.tick_at(TARGET);
    assert_eq!(page.text(), CARD_REACHED);
    assert_eq!(page.cleared(), 1);
    assert_eq!(page.active(), 0);
}

#[test]
fn terminal_script_matches_core_decomposition() {
    let offsets = [
        1,
        999,
        1000,
        59_999,
        60_000,
        3_599_999,
        3_600_000,
        DAY - 1,
        DAY,
        365 * DAY - 1,
        365 * DAY + 1234,
        10_000 * DAY + 45_296_789,
        TARGET,
    ];
    for offset in offsets {
        let now = TARGET - offset;
        let mut page = LoadedPage::load(Variant::Terminal, now);
        page.tick_at(now);

        let countdown = decompose(TargetInstant::Y2K38, now, Policy::Days);
        let expected = terminal_lines(countdown.remaining().unwrap());
        assert_eq!(page.text(), expected, "offset = {offset}");
    }
}

#[test]
fn card_script_matches_core_decomposition() {
    let offsets = [1, 86_399_999, 364 * DAY + 1, 365 * DAY, 3 * 365 * DAY + 7 * DAY + 3_723_000];
    for offset in offsets {
        let now = TARGET - offset;
        let mut page = LoadedPage::load(Variant::Card, now);

        let countdown = decompose(TargetInstant::Y2K38, now, Policy::Years);
        let segments = countdown.remaining().unwrap();
        let values: Vec<String> = segments.iter().map(|s| s.display_value()).collect();
        let expected: Vec<(&str, &str)> = values
            .iter()
            .zip(segments.iter())
            .map(|(value, s)| (value.as_str(), s.unit.label()))
            .collect();
        assert_eq!(page.inner_html(), card_blocks(&expected), "offset = {offset}");
    }
}
