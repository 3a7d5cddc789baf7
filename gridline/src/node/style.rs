/// Semantic color role, resolved by the host toolkit's theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Primary,
    Muted,
    Info,
    Success,
    Neutral,
    Warning,
    Danger,
}

/// Text and element styling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    /// Foreground role
    pub fg: Option<Tone>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Dim/faint text
    pub dim: bool,
}

impl Style {
    /// Create a new empty style
    pub const fn new() -> Self {
        Self {
            fg: None,
            bold: false,
            italic: false,
            dim: false,
        }
    }

    /// Set foreground role
    pub const fn fg(mut self, tone: Tone) -> Self {
        self.fg = Some(tone);
        self
    }

    /// Set bold
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set dim
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}
