// Interactive menu over a sender/receiver session
// Reads from any BufRead and writes the transcript to any Write

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::RsaError;
use crate::rsa::Session;
use crate::util::{format_sequence, parse_key_size};

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Standard,
    Signature,
    Combined,
    Exit,
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Choice::Standard),
            "2" => Ok(Choice::Signature),
            "3" => Ok(Choice::Combined),
            "4" => Ok(Choice::Exit),
            _ => Err(()),
        }
    }
}

/// Read one line without its line ending; None at end of input
fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> anyhow::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    read_line(input)
}

/// Prompt for a key size until a session can be generated from it
fn build_session<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Session> {
    let mut rng = config.rng();

    // A rejected --bits value falls back to the prompt
    if let Some(bits) = config.bits {
        match Session::generate(bits, &mut rng) {
            Ok(session) => return Ok(session.with_strict(config.strict)),
            Err(e @ RsaError::InvalidKeySize { .. }) => {
                warn!(bits, "configured key size rejected");
                writeln!(output, "{}", e)?;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("cannot generate {}-bit keys", bits));
            }
        }
    }

    loop {
        let Some(line) = prompt(input, output, "Enter key size in bits (e.g., 16, 32, 64): ")? else {
            bail!("no key size given");
        };

        let bits = match parse_key_size(&line) {
            Ok(bits) => bits,
            Err(e) => {
                writeln!(output, "Invalid key size {:?}: {}", line, e)?;
                continue;
            }
        };

        match Session::generate(bits, &mut rng) {
            Ok(session) => return Ok(session.with_strict(config.strict)),
            Err(e @ RsaError::InvalidKeySize { .. }) => {
                writeln!(output, "{}", e)?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_keys<W: Write>(config: &Config, session: &Session, output: &mut W) -> anyhow::Result<()> {
    writeln!(output, "Public Key: {}", session.sender.public_key)?;
    if config.show_private {
        writeln!(output, "Private Key: {}", session.sender.private_key)?;
    }
    Ok(())
}

fn print_menu<W: Write>(output: &mut W) -> anyhow::Result<()> {
    writeln!(output)?;
    writeln!(output, "Choose an option:")?;
    writeln!(output, "1. Standard RSA Encryption/Decryption")?;
    writeln!(output, "2. Digital Signature (Sign with Private Key)")?;
    writeln!(output, "3. Combined (Sign then Encrypt)")?;
    writeln!(output, "4. Exit")?;
    Ok(())
}

/// One menu operation run against the session, rendered for display
type Exchange = fn(&Session, &str) -> crate::error::Result<String>;

/// Run one menu operation; Ok(false) when input ran out mid-operation
fn run_choice<R: BufRead, W: Write>(
    choice: Choice,
    session: &Session,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<bool> {
    let (text, exchange): (&str, Exchange) = match choice {
        Choice::Standard => ("[Sender] Enter a message to encrypt: ", |session: &Session, message: &str| {
            session.standard(message).map(|exchange| {
                format!(
                    "[Sender] Encrypted Message: {}\n\n[Receiver] Decrypting the message...\n[Receiver] Decrypted Message: {}",
                    format_sequence(&exchange.ciphertext),
                    exchange.decrypted
                )
            })
        }),
        Choice::Signature => ("[Sender] Enter a message to sign: ", |session: &Session, message: &str| {
            session.signature(message).map(|exchange| {
                format!(
                    "[Sender] Digital Signature: {}\n\n[Receiver] Verifying the message...\n[Receiver] Verified Message: {}",
                    format_sequence(&exchange.signature),
                    exchange.verified
                )
            })
        }),
        Choice::Combined => ("[Sender] Enter a message to sign and encrypt: ", |session: &Session, message: &str| {
            session.combined(message).map(|exchange| {
                format!(
                    "[Sender] Encrypted Signed Message: {}\n\n[Receiver] Decrypting and verifying the message...\n[Receiver] Original Message: {}",
                    format_sequence(&exchange.ciphertext),
                    exchange.recovered
                )
            })
        }),
        Choice::Exit => return Ok(false),
    };

    let Some(message) = prompt(input, output, text)? else {
        return Ok(false);
    };
    let outcome = exchange(session, &message);

    match outcome {
        Ok(transcript) => writeln!(output, "{}", transcript)?,
        Err(e) => {
            warn!(?choice, error = %e, "operation aborted");
            writeln!(output, "Error: {}", e)?;
        }
    }
    Ok(true)
}

/// Drive the whole interactive program until the user exits
///
/// End of input at the menu counts as choosing Exit.
pub fn run<R: BufRead, W: Write>(config: &Config, input: &mut R, output: &mut W) -> anyhow::Result<()> {
    writeln!(output, "RSA Encryption/Decryption")?;

    let session = build_session(config, input, output)?;
    info!(
        bits = session.sender.bit_length(),
        strict = session.strict,
        "session keys generated"
    );
    print_keys(config, &session, output)?;

    loop {
        print_menu(output)?;
        let Some(line) = prompt(input, output, "Enter your choice (1-4): ")? else {
            break;
        };

        match line.parse::<Choice>() {
            Ok(Choice::Exit) => break,
            Ok(choice) => {
                if !run_choice(choice, &session, input, output)? {
                    break;
                }
            }
            Err(()) => writeln!(output, "Invalid choice, please try again.")?,
        }

        if prompt(input, output, "Press Enter to continue...")?.is_none() {
            break;
        }
    }

    writeln!(output, "Exiting the program.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_with(config: &Config, script: &str) -> (anyhow::Result<()>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = run(config, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    fn seeded() -> Config {
        Config {
            seed: Some(1234),
            ..Config::default()
        }
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(" 1 ".parse::<Choice>(), Ok(Choice::Standard));
        assert_eq!("2".parse::<Choice>(), Ok(Choice::Signature));
        assert_eq!("3".parse::<Choice>(), Ok(Choice::Combined));
        assert_eq!("4".parse::<Choice>(), Ok(Choice::Exit));
        assert!("5".parse::<Choice>().is_err());
        assert!("".parse::<Choice>().is_err());
    }

    #[test]
    fn test_immediate_exit() {
        let (result, out) = run_with(&seeded(), "16\n4\n");
        assert!(result.is_ok());
        assert!(out.starts_with("RSA Encryption/Decryption\n"));
        assert!(out.contains("Public Key: ("));
        assert!(!out.contains("Private Key:"));
        assert!(out.trim_end().ends_with("Exiting the program."));
    }

    #[test]
    fn test_reprompts_on_bad_key_size() {
        let (result, out) = run_with(&seeded(), "abc\n3\n16\n4\n");
        assert!(result.is_ok());
        assert!(out.contains("Invalid key size \"abc\""));
        assert!(out.contains("Invalid key size: must be an even number"));
        assert_eq!(out.matches("Enter key size in bits").count(), 3);
    }

    #[test]
    fn test_no_key_size_is_error() {
        let (result, _) = run_with(&seeded(), "");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejected_configured_bits_falls_back_to_prompt() {
        let config = Config {
            bits: Some(7),
            ..seeded()
        };
        let (result, out) = run_with(&config, "16\n4\n");
        assert!(result.is_ok());
        assert!(out.contains("got 7"));
        assert_eq!(out.matches("Enter key size in bits").count(), 1);
        assert!(out.contains("Public Key: ("));
    }

    #[test]
    fn test_message_prompt_matches_choice() {
        let (_, out) = run_with(&seeded(), "16\n2\nA\n\n3\nA\n\n4\n");
        assert!(out.contains("[Sender] Enter a message to sign: "));
        assert!(out.contains("[Sender] Enter a message to sign and encrypt: "));
        assert!(!out.contains("Enter a message to encrypt: "));
    }

    #[test]
    fn test_invalid_choice() {
        let (result, out) = run_with(&seeded(), "16\n9\n\n4\n");
        assert!(result.is_ok());
        assert!(out.contains("Invalid choice, please try again."));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (result, out) = run_with(&seeded(), "16\n");
        assert!(result.is_ok());
        assert!(out.contains("Exiting the program."));
    }
}
