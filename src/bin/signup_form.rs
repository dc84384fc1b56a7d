//! Terminal version of the signup form.
//!
//! Prompts for an email until one is valid, submits it to the relay and shows the outcome.
//! The relay address comes from `SIGNUP_RELAY_URL` (defaults to `http://127.0.0.1:8080`).
//! An email passed as the first argument is submitted once without prompting.

use anyhow::Result;
use newsletter_signup::form::{
    FormStatus, RelayClient, SubscribeApi, SubscribeForm, SUCCESS_HEADLINE,
};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<()> {
    newsletter_signup::init_cli_tracing();

    let relay_url = std::env::var("SIGNUP_RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.into());
    let client = RelayClient::new(relay_url)?;
    let mut form = SubscribeForm::new();

    let mut stdout = io::stdout();
    stdout
        .write_all(
            b"Newsletter Exclusiva\n\
            Receba dicas semanais sobre desenvolvimento Full-Stack, arquitetura e carreira.\n\n",
        )
        .await?;

    if let Some(email) = std::env::args().nth(1) {
        submit(&mut form, &client, &email).await?;
        render(&form).await?;
        if form.status() != FormStatus::Success {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        stdout.write_all(b"E-mail profissional: ").await?;
        stdout.flush().await?;

        let Some(email) = lines.next_line().await? else {
            break;
        };

        submit(&mut form, &client, &email).await?;
        render(&form).await?;

        if form.status() == FormStatus::Success {
            break;
        }
    }

    Ok(())
}

async fn submit<A: SubscribeApi>(form: &mut SubscribeForm, api: &A, email: &str) -> Result<()> {
    let Some(email) = form.begin_submit(email) else {
        return Ok(());
    };

    let mut stdout = io::stdout();
    stdout
        .write_all(format!("[{}]\n", form.submit_label()).as_bytes())
        .await?;

    let outcome = api.subscribe(&email).await;
    form.finish_submit(outcome);

    Ok(())
}

async fn render(form: &SubscribeForm) -> Result<()> {
    let mut out = String::new();

    if let Some(field_error) = form.field_error() {
        out.push_str(&format!("  ! {field_error}\n"));
    }

    match form.status() {
        FormStatus::Success => {
            out.push_str(&format!("{SUCCESS_HEADLINE}\n"));
            out.push_str(&format!("{}\n", form.message().unwrap_or_default()));
        }
        FormStatus::Error => {
            out.push_str(&format!("  x {}\n", form.message().unwrap_or_default()));
        }
        FormStatus::Idle | FormStatus::Submitting => {}
    }

    let mut stdout = io::stdout();
    stdout.write_all(out.as_bytes()).await?;
    stdout.flush().await?;

    Ok(())
}
