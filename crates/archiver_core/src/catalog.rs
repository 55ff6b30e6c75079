//! Bilingual message catalog for run status and progress strings.
//!
//! The tables are immutable and compiled in; callers pass the locale
//! explicitly so nothing here depends on ambient state.

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Parse a BCP 47-ish tag, falling back to English.
    pub fn from_tag(tag: &str) -> Self {
        let lower = tag.to_lowercase();
        if lower == "es" || lower.starts_with("es-") {
            Locale::Es
        } else {
            Locale::En
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

/// Keys for every user-visible status, progress and error string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    LoadingConversations,
    ScrollCompleted,
    /// `{0}` = attempt number.
    StartingSelection,
    /// `{0}` = running total.
    ConversationSelected,
    /// `{0}` = remaining unselected count.
    RetryingSelection,
    SearchingArchiveControl,
    ArchiveControlFound,
    ProcessPaused,
    ProcessResumed,
    ProcessStopped,
    NoConversations,
    /// `{0}` = final count.
    ArchiveSuccess,
    IncompleteWarning,
    /// `{0}` = selector that never matched.
    ElementTimeout,
    SelectionItemFailed,
    ArchiveControlMissing,
    /// `{0}` = reason.
    ActionFailed,
}

/// Look up a message and substitute positional `{0}`, `{1}`, ... arguments.
pub fn lookup(locale: Locale, key: MessageKey, args: &[&str]) -> String {
    substitute(template(locale, key), args)
}

fn template(locale: Locale, key: MessageKey) -> &'static str {
    use MessageKey::*;
    match locale {
        Locale::En => match key {
            LoadingConversations => "Loading conversations...",
            ScrollCompleted => "All conversations loaded.",
            StartingSelection => "Starting selection pass {0}.",
            ConversationSelected => "Selected {0} conversations so far.",
            RetryingSelection => "{0} conversations still unselected, retrying.",
            SearchingArchiveControl => "Searching for the archive control...",
            ArchiveControlFound => "Archive control found.",
            ProcessPaused => "Archiving paused.",
            ProcessResumed => "Archiving resumed.",
            ProcessStopped => "Archiving stopped by the user.",
            NoConversations => "No conversations to archive.",
            ArchiveSuccess => "Archived {0} conversations.",
            IncompleteWarning => " Warning: some conversations could not be selected.",
            ElementTimeout => "Timed out waiting for element: {0}",
            SelectionItemFailed => "Failed to select a conversation, skipping it.",
            ArchiveControlMissing => "The archive control could not be found.",
            ActionFailed => "Invoking the archive control failed: {0}",
        },
        Locale::Es => match key {
            LoadingConversations => "Cargando conversaciones...",
            ScrollCompleted => "Todas las conversaciones cargadas.",
            StartingSelection => "Iniciando pasada de selección {0}.",
            ConversationSelected => "Se seleccionaron {0} conversaciones hasta ahora.",
            RetryingSelection => "Quedan {0} conversaciones sin seleccionar, reintentando.",
            SearchingArchiveControl => "Buscando el control de archivado...",
            ArchiveControlFound => "Control de archivado encontrado.",
            ProcessPaused => "Archivado en pausa.",
            ProcessResumed => "Archivado reanudado.",
            ProcessStopped => "Archivado detenido por el usuario.",
            NoConversations => "No hay conversaciones para archivar.",
            ArchiveSuccess => "Se archivaron {0} conversaciones.",
            IncompleteWarning => " Aviso: algunas conversaciones no pudieron seleccionarse.",
            ElementTimeout => "Tiempo de espera agotado para el elemento: {0}",
            SelectionItemFailed => "No se pudo seleccionar una conversación, se omite.",
            ArchiveControlMissing => "No se encontró el control de archivado.",
            ActionFailed => "Falló la invocación del control de archivado: {0}",
        },
    }
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut message = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        message = message.replace(&format!("{{{index}}}"), arg);
    }
    message
}
