// Bot presence, set once the gateway session is ready.

use poise::serenity_prelude as serenity;

/// Activity text, shown as "Playing `!help`".
pub fn presence_text(prefix: &str) -> String {
    format!("{prefix}help")
}

pub fn on_ready(ctx: &serenity::Context, prefix: &str) {
    let activity = serenity::ActivityData::playing(presence_text(prefix));
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_the_help_command() {
        assert_eq!(presence_text("?"), "?help");
    }
}
