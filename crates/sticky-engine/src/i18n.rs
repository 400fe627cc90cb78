//! Built-in operator-facing strings.
//!
//! Lookups fall back to `en-US`, then to the key itself, so a missing
//! translation degrades to something readable instead of an error.

/// Locales with a string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    EnUs,
    PtBr,
}

impl Locale {
    /// Map a platform locale hint (`"pt-BR"`, `"en-GB"`, ...) onto a supported table.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(|h| h.trim().to_ascii_lowercase()) {
            Some(h) if h == "pt-br" || h == "pt" || h.starts_with("pt-") => Self::PtBr,
            _ => Self::EnUs,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::PtBr => "pt-BR",
        }
    }
}

pub fn translate(key: &str, locale: Locale) -> &str {
    let hit = match locale {
        Locale::EnUs => en_us(key),
        Locale::PtBr => pt_br(key),
    };
    hit.or_else(|| en_us(key)).unwrap_or(key)
}

/// Translate and substitute `{name}` placeholders.
pub fn format(key: &str, replacements: &[(&str, &str)], locale: Locale) -> String {
    let mut text = translate(key, locale).to_string();
    for (name, value) in replacements {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}

pub fn success(text: &str) -> String {
    format!("`✅`・{}", text)
}

pub fn failure(text: &str) -> String {
    format!("`❌`・{}", text)
}

fn en_us(key: &str) -> Option<&'static str> {
    Some(match key {
        // Errors
        "error.channel.notFound" => "Channel not found",
        "error.sticky.notFound" => "No sticky message found in this channel",
        "error.sticky.remove.notFound" => "Sticky message not found in this channel",
        "error.message.sendError" => "Error on send message",
        "error.store.failed" => "Could not save the sticky message",
        "error.validation.titleDescriptionRequired" => "The title and description are required.",
        "error.validation.colorInvalid" => "The color is not a valid hex color.",
        "error.validation.messageRequired" => "The message is required.",
        "error.permissions.adminRequired" => "You don't have permission to use this command.",

        // Form defaults
        "default.sticky.title" => "Sticky Message",
        "default.sticky.description" => "This is a sticky message with embed",
        "default.sticky.message" => "This is a sticky message with text",
        "default.sticky.color" => "#89CFF0",

        // Success
        "success.sticky.sent" => "Sticky message sent successfully.",
        "success.sticky.removed" => "Sticky message removed from {channel}",

        // Guild welcome
        "guild.add.title" => "Mr. Sticky - thank you for adding me to your server!",
        "guild.add.commands" => "My commands:",
        "guild.add.command.sticky" => "Create a sticky message (embed or text)",
        "guild.add.command.stickyremove" => {
            "Remove the sticky message from a channel (if no channel is provided, it will remove the sticky message from the current channel)"
        }

        _ => return None,
    })
}

fn pt_br(key: &str) -> Option<&'static str> {
    Some(match key {
        "error.channel.notFound" => "Canal não encontrado",
        "error.sticky.notFound" => "Nenhuma mensagem fixa encontrada neste canal",
        "error.sticky.remove.notFound" => "Mensagem fixa não encontrada neste canal",
        "error.message.sendError" => "Erro ao enviar mensagem",
        "error.store.failed" => "Não foi possível salvar a mensagem fixa",
        "error.validation.titleDescriptionRequired" => "O título e a descrição são obrigatórios.",
        "error.validation.colorInvalid" => "A cor não é uma cor hexadecimal válida.",
        "error.validation.messageRequired" => "A mensagem é obrigatória.",
        "error.permissions.adminRequired" => "Você não tem permissão para usar este comando.",

        "default.sticky.title" => "Mensagem Fixa",
        "default.sticky.description" => "Esta é uma mensagem fixa com embed",
        "default.sticky.message" => "Esta é uma mensagem fixa com texto",
        "default.sticky.color" => "#89CFF0",

        "success.sticky.sent" => "Mensagem fixa enviada com sucesso.",
        "success.sticky.removed" => "Mensagem fixa removida de {channel}",

        "guild.add.title" => "Mr. Sticky - obrigado por me adicionar ao seu servidor!",
        "guild.add.commands" => "Meus comandos:",
        "guild.add.command.sticky" => "Criar uma mensagem fixa (embed ou texto)",
        "guild.add.command.stickyremove" => {
            "Remover a mensagem fixa de um canal (se nenhum canal for fornecido, removerá a mensagem fixa do canal atual)"
        }

        _ => return None,
    })
}
