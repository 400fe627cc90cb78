use sticky_types::StickyContent;

use crate::i18n::{self, Locale};

/// Accent for the welcome embed.
const WELCOME_COLOR: &str = "#57F287";

/// The DM sent to whoever added the bot to a guild.
pub fn welcome_content(locale: Locale) -> StickyContent {
    let t = |key: &'static str| -> &'static str { i18n::translate(key, locale) };

    let description = [
        format!("📌・{}", t("guild.add.commands")),
        format!("- `/sticky <type>` - {}", t("guild.add.command.sticky")),
        format!("- `/stickyremove <channel>` - {}", t("guild.add.command.stickyremove")),
    ]
    .join("\n");

    StickyContent::Embed {
        title: t("guild.add.title").to_string(),
        description,
        color: WELCOME_COLOR.to_string(),
    }
}
