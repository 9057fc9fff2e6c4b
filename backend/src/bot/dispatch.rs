use chrono::NaiveDate;

use super::command::BotCommand;
use super::Sender;
use crate::db::Store;
use crate::dto::{RegisterRequest, SettingsRequest, SleepLogRequest, WeightLogRequest};
use crate::error::AppError;
use crate::services::{dashboard, logs, users};

const HELP: &str = "Commands:\n\
/sleep 23:30 07:15 [note] - log last night\n\
/weight 72.5 [note] - log today's weight\n\
/streak - consecutive days logged\n\
/stats - last 7 entries and targets\n\
/target_weight 70 - set a weight goal\n\
/target_sleep 8 - set a sleep goal";

/// Runs one command for `sender` and returns the reply text. Errors become
/// user-facing replies; internal detail is only logged.
pub async fn handle_command(
    store: &dyn Store,
    sender: &Sender,
    command: BotCommand,
    today: NaiveDate,
) -> String {
    match run(store, sender, command, today).await {
        Ok(reply) => reply,
        Err(e) => error_reply(&e),
    }
}

async fn run(
    store: &dyn Store,
    sender: &Sender,
    command: BotCommand,
    today: NaiveDate,
) -> Result<String, AppError> {
    let telegram_id = sender.id;

    let reply = match command {
        BotCommand::Start => {
            users::register(
                store,
                RegisterRequest {
                    telegram_id: Some(telegram_id),
                    username: sender.username.clone(),
                },
            )
            .await?;
            format!("Welcome! I'll keep track of your sleep and weight.\n\n{HELP}")
        }
        BotCommand::Help | BotCommand::Unknown => HELP.to_string(),
        BotCommand::Usage(usage) => format!("Usage: {usage}"),
        BotCommand::Sleep { start, end, note } => {
            let logged = logs::log_sleep(
                store,
                SleepLogRequest {
                    telegram_id: Some(telegram_id),
                    date: Some(today.to_string()),
                    sleep_start: Some(start),
                    sleep_end: Some(end),
                    note,
                },
            )
            .await?;
            format!(
                "Logged {:.1} h of sleep for {}. Quality: {}/10",
                logged.hours, logged.log.log_date, logged.quality
            )
        }
        BotCommand::Weight { kg, note } => {
            let log = logs::log_weight(
                store,
                WeightLogRequest {
                    telegram_id: Some(telegram_id),
                    date: Some(today.to_string()),
                    weight: Some(serde_json::Value::String(kg)),
                    note,
                },
            )
            .await?;
            format!("Logged {:.1} kg for {}", log.weight_kg, log.log_date)
        }
        BotCommand::Streak => {
            let summary = dashboard::streak(store, telegram_id, today).await?;
            format!(
                "Current streak: {} {} (longest: {})",
                summary.current,
                days(summary.current),
                summary.longest
            )
        }
        BotCommand::Stats => {
            let dash = dashboard::dashboard(store, telegram_id).await?;
            render_stats(&dash)
        }
        BotCommand::TargetWeight(kg) => {
            users::update_settings(
                store,
                SettingsRequest {
                    telegram_id: Some(telegram_id),
                    target_weight_kg: Some(kg),
                    target_sleep_hours: None,
                },
            )
            .await?;
            format!("Target weight set to {kg:.1} kg")
        }
        BotCommand::TargetSleep(hours) => {
            users::update_settings(
                store,
                SettingsRequest {
                    telegram_id: Some(telegram_id),
                    target_weight_kg: None,
                    target_sleep_hours: Some(hours),
                },
            )
            .await?;
            format!("Target sleep set to {hours:.1} h")
        }
    };

    Ok(reply)
}

fn render_stats(dash: &dashboard::Dashboard) -> String {
    let mut out = String::from("Sleep:\n");
    if dash.sleep.is_empty() {
        out.push_str("  no entries yet\n");
    }
    for log in &dash.sleep {
        out.push_str(&format!(
            "  {}  {:.1} h  quality {}/10\n",
            log.log_date, log.hours_slept, log.quality
        ));
    }

    out.push_str("Weight:\n");
    if dash.weight.is_empty() {
        out.push_str("  no entries yet\n");
    }
    for log in &dash.weight {
        out.push_str(&format!("  {}  {:.1} kg\n", log.log_date, log.weight_kg));
    }

    let targets = dash.targets;
    out.push_str(&format!(
        "Targets: weight {}, sleep {}",
        targets
            .target_weight_kg
            .map(|kg| format!("{kg:.1} kg"))
            .unwrap_or_else(|| "not set".into()),
        targets
            .target_sleep_hours
            .map(|h| format!("{h:.1} h"))
            .unwrap_or_else(|| "not set".into()),
    ));
    out
}

fn days(n: u32) -> &'static str {
    if n == 1 {
        "day"
    } else {
        "days"
    }
}

fn error_reply(e: &AppError) -> String {
    match e {
        AppError::UserNotFound => "You're not registered yet. Send /start first.".into(),
        AppError::MissingFields(_) => format!("Something is missing.\n\n{HELP}"),
        AppError::InvalidFormat(_) => {
            "I couldn't read that. Times look like 23:30, weights like 72.5.".into()
        }
        AppError::NotFound => "Nothing found.".into(),
        AppError::StorageUnavailable(err) => {
            tracing::error!(error = %err, "Storage error during bot command");
            "Something went wrong on our side. Please try again later.".into()
        }
        AppError::Internal(err) => {
            tracing::error!(error = %err, "Internal error during bot command");
            "Something went wrong on our side. Please try again later.".into()
        }
    }
}
