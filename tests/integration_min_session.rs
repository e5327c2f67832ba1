// Drives the compiled binary through a pseudo terminal, covering the real
// crossterm event loop and the raw-mode setup/teardown in main.
//
// Needs a PTY, so it is Unix-only and ignored by default. Run with:
// `cargo test --test integration_min_session -- --ignored`

#![cfg(unix)]

use std::{thread, time::Duration};

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_types_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("kombo");
    let mut p = spawn(format!("{} -n 1 -l ab", bin.display()))?;

    // Let the alternate screen come up before sending input.
    thread::sleep(Duration::from_millis(200));

    // One-letter words over {a, b}: typing both letters completes whichever
    // word was served first.
    p.send("ab")?;
    thread::sleep(Duration::from_millis(200));

    // ESC quits from the typing screen; a clean exit closes the PTY.
    p.send("\x1b")?;
    p.expect(Eof)?;
    Ok(())
}
