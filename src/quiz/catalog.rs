use std::path::{Path, PathBuf};

/// The built-in banks shipped next to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedBank {
    Math,
    English,
    Science,
}

impl NamedBank {
    pub const ALL: [NamedBank; 3] = [NamedBank::Math, NamedBank::English, NamedBank::Science];

    pub fn file_name(&self) -> &'static str {
        match self {
            NamedBank::Math => "math.txt",
            NamedBank::English => "english.txt",
            NamedBank::Science => "science.txt",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            NamedBank::Math => "Math",
            NamedBank::English => "English",
            NamedBank::Science => "Science",
        }
    }
}

/// What the player can pick on the quiz menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Named(NamedBank),
    Random,
    AuthorNew,
    Custom,
}

impl MenuChoice {
    /// Maps menu key `1`..`6` to a choice.
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            1 => Some(MenuChoice::Named(NamedBank::Math)),
            2 => Some(MenuChoice::Named(NamedBank::English)),
            3 => Some(MenuChoice::Named(NamedBank::Science)),
            4 => Some(MenuChoice::Random),
            5 => Some(MenuChoice::AuthorNew),
            6 => Some(MenuChoice::Custom),
            _ => None,
        }
    }
}

/// Where the bank files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    dir: PathBuf,
}

impl Catalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, bank: NamedBank) -> PathBuf {
        self.dir.join(bank.file_name())
    }

    /// Resolves an authored filename: relative names land in the bank directory.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }

    /// Candidate banks for a random quiz: the built-ins plus the authored bank
    /// when it still exists on disk.
    pub fn random_pool(&self, custom: Option<&Path>) -> Vec<PathBuf> {
        let mut pool = NamedBank::ALL
            .iter()
            .map(|b| self.path_of(*b))
            .collect::<Vec<_>>();
        if let Some(custom) = custom.filter(|p| p.exists()) {
            pool.push(custom.to_path_buf());
        }
        pool
    }
}
