//! Prints an Argon2id PHC string for a password read from stdin.
//!
//! Used to author the JSON credential registry (`FERREMAS_USERS_FILE`).

use std::io::BufRead;

use anyhow::Context;

use ferremas_auth::PasswordVerifier;

fn main() -> anyhow::Result<()> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    let hash = PasswordVerifier::default().hash(password)?;
    println!("{}", hash.as_str());
    Ok(())
}
