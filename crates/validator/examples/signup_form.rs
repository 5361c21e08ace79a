//! Validating a signup form submission.
//!
//! Run with `RUST_LOG=formguard_validator=trace cargo run --example signup_form`
//! to see which rules fail.

use formguard_validator::prelude::*;
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let address = Validator::builder()
        .field("city", [is_required(), is_string()])
        .field("zip", [is_required(), match_regex(r"^\d{5}$")?])
        .build()?;

    let signup = Validator::builder()
        .field("email", [is_required(), is_string(), to_lower_case(), is_email()])
        .field(
            "password",
            FieldSpec::labeled([is_required(), is_len(LenConfig::new().min(8))?], "Password"),
        )
        .field(
            "confirm",
            [is_custom(|value, ctx| {
                (Some(value) != ctx.sibling("password")).then(|| "'%name%' must match the password.".to_owned())
            })],
        )
        .field("plan", is_in(Choices::strings(["free", "pro"]))?)
        .field("address", is_object(address))
        .field(
            "interests",
            is_array(RuleSet::new([is_string(), to_lower_case()])?, ArrayConfig::new().max(5))?,
        )
        .build()?;

    let submission = json!({
        "email": "Ada@Example.COM",
        "password": "hunter2",
        "confirm": "hunter3",
        "plan": "enterprise",
        "address": {"city": "London", "zip": "N1"},
        "interests": ["Math", 42],
    });

    let outcome = signup.validate_value(&submission, &ValidateOptions::new())?;
    println!("values: {}", serde_json::to_string_pretty(&outcome.values)?);

    if let Some(errors) = &outcome.errors {
        for error in errors.leaves() {
            println!("{:<16} {:<12} {}", error.path.to_string(), error.validator, error.message().unwrap_or_default());
        }
        println!("{}", serde_json::to_string_pretty(errors)?);
    }

    let nested = signup.validate_value(&submission, &ValidateOptions::new().show_nested_error(true))?;
    if let Some(errors) = nested.errors {
        println!("{} errors under {} fields", errors.total_errors(), errors.len());
    }

    Ok(())
}
