/// A parsed bot command. Arguments stay as raw strings where the service
/// layer owns validation, so both front ends reject the same inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum BotCommand {
    Start,
    Help,
    Sleep {
        start: String,
        end: String,
        note: Option<String>,
    },
    Weight {
        kg: String,
        note: Option<String>,
    },
    Streak,
    Stats,
    TargetWeight(f64),
    TargetSleep(f64),
    /// Recognised command with unusable arguments; carries its usage line.
    Usage(&'static str),
    Unknown,
}

pub const SLEEP_USAGE: &str = "/sleep 23:30 07:15 [note]";
pub const WEIGHT_USAGE: &str = "/weight 72.5 [note]";
pub const TARGET_WEIGHT_USAGE: &str = "/target_weight 70";
pub const TARGET_SLEEP_USAGE: &str = "/target_sleep 8";

pub fn parse_command(text: &str) -> BotCommand {
    let mut words = text.split_whitespace();
    let Some(head) = words.next() else {
        return BotCommand::Unknown;
    };
    // Group chats address commands as `/cmd@BotName`
    let name = head.split('@').next().unwrap_or(head).to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    match name.as_str() {
        "/start" => BotCommand::Start,
        "/help" => BotCommand::Help,
        "/streak" => BotCommand::Streak,
        "/stats" => BotCommand::Stats,
        "/sleep" => match args.as_slice() {
            [start, end, rest @ ..] => BotCommand::Sleep {
                start: (*start).to_string(),
                end: (*end).to_string(),
                note: join_note(rest),
            },
            _ => BotCommand::Usage(SLEEP_USAGE),
        },
        "/weight" => match args.as_slice() {
            [kg, rest @ ..] => BotCommand::Weight {
                kg: (*kg).to_string(),
                note: join_note(rest),
            },
            _ => BotCommand::Usage(WEIGHT_USAGE),
        },
        "/target_weight" => parse_number(&args)
            .map(BotCommand::TargetWeight)
            .unwrap_or(BotCommand::Usage(TARGET_WEIGHT_USAGE)),
        "/target_sleep" => parse_number(&args)
            .map(BotCommand::TargetSleep)
            .unwrap_or(BotCommand::Usage(TARGET_SLEEP_USAGE)),
        _ => BotCommand::Unknown,
    }
}

fn join_note(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn parse_number(args: &[&str]) -> Option<f64> {
    match args {
        [value] => value.replace(',', ".").parse().ok().filter(|v: &f64| v.is_finite()),
        _ => None,
    }
}
