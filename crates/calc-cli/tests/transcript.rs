//! End-to-end key scripts rendered as plain-text transcripts.

use calc_cli::script::parse_script;
use calc_cli::session::{Session, transcript};
use calc_core::{CalculatorMode, CapabilitySettings, keys};
use calc_settings::{FileSource, SettingsSnapshot, SettingsSource};

fn run(mode: CalculatorMode, script: &str, settings: &SettingsSnapshot) -> String {
    let mut session = Session::new(mode);
    let steps = session.run(parse_script(script).unwrap(), settings);
    transcript(&steps, session.mode(), session.state())
}

#[test]
fn chained_arithmetic_folds_left_to_right() {
    let text = run(
        CalculatorMode::Standard,
        "1 + 2 * 3 Enter",
        &SettingsSnapshot::default(),
    );
    insta::assert_snapshot!(text, @r"
    1                   1  digit 1
    +                   1  operator +
    2                   2  digit 2
    *                   3  operator ×
    3                   3  digit 3
    Enter               9  operator =

    display: 9
    history: 3 × 3 = 9
    memory:  0
    mode:    Standard DEG DWORD DEC
    ");
}

#[test]
fn disabled_function_is_refused_and_others_still_work() {
    let settings = SettingsSnapshot::new(true, CapabilitySettings::new().with(keys::SQRT, false));
    let text = run(CalculatorMode::Scientific, "9 q Shift+r Ctrl+m", &settings);
    insta::assert_snapshot!(text, @r"
    9                   9  digit 9
    q                   9  rejected: Function disabled: sqrt is disabled by the administrator
    Shift+r           729  cube
    Ctrl+m            729  MS

    display: 729
    history: cube(9) = 729
    memory:  729
    mode:    Scientific DEG DWORD DEC
    ");
}

#[test]
fn programmer_session_masks_and_validates_digits() {
    let script = "
        Ctrl+h 1 f f   # 1FF in hex
        Ctrl+1         # byte word size keeps FF
        ~              # not FF is 0
        Ctrl+b 2       # 2 is not a binary digit
    ";
    let text = run(CalculatorMode::Programmer, script, &SettingsSnapshot::default());
    insta::assert_snapshot!(text, @r"
    Ctrl+h              0  convert to HEX
    1                   1  digit 1
    f                  1F  digit F
    f                 1FF  digit F
    Ctrl+1             FF  word size BYTE
    ~                   0  not
    Ctrl+b              0  convert to BIN
    2                   0  rejected: Invalid digit: 2 is not valid: only 0-1 are valid in binary mode

    display: 0
    history: not(FF) = 0
    memory:  0
    mode:    Programmer DEG BYTE BIN
    ");
}

#[test]
fn switched_off_calculator_refuses_every_key() {
    let settings = SettingsSnapshot::new(false, CapabilitySettings::new());
    let mut session = Session::new(CalculatorMode::Standard);
    let steps = session.run(parse_script("1 + Escape").unwrap(), &settings);
    assert_eq!(steps.len(), 3);
    for step in &steps {
        assert_eq!(
            step.outcome(),
            "rejected: Calculator disabled: The calculator is disabled by the administrator"
        );
        assert_eq!(step.display, "0");
    }
}

#[tokio::test]
async fn settings_file_gates_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capabilities.toml");
    std::fs::write(&path, "[capabilities]\nscientific_mode = false\n").unwrap();
    let settings = FileSource::new(&path).fetch().await.unwrap();

    let mut session = Session::new(CalculatorMode::Scientific);
    let steps = session.run(parse_script("7").unwrap(), &settings);
    assert_eq!(
        steps[0].outcome(),
        "rejected: Mode disabled: Scientific mode is disabled by the administrator"
    );

    let mut session = Session::new(CalculatorMode::Standard);
    session.run(parse_script("7").unwrap(), &settings);
    assert_eq!(session.state().display, "7");
}
