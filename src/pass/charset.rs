//! Character classes and their fixed alphabets.

use std::fmt;

pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:'\",.<>/?~`";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    pub fn alphabet(self) -> &'static [u8] {
        match self {
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    pub fn size(self) -> usize {
        self.alphabet().len()
    }

    /// Class of a single character, `None` for anything outside the four alphabets.
    pub fn of(c: char) -> Option<CharacterClass> {
        if !c.is_ascii() {
            return None;
        }
        let b = c as u8;
        Self::ALL.into_iter().find(|class| class.alphabet().contains(&b))
    }

    pub fn label(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "Lowercase",
            CharacterClass::Uppercase => "Uppercase",
            CharacterClass::Digit => "Numbers",
            CharacterClass::Symbol => "Symbols",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which classes are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSet {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl ClassSet {
    pub const NONE: ClassSet = ClassSet {
        lowercase: false,
        uppercase: false,
        digits: false,
        symbols: false,
    };

    pub const ALL: ClassSet = ClassSet {
        lowercase: true,
        uppercase: true,
        digits: true,
        symbols: true,
    };

    pub fn only(classes: &[CharacterClass]) -> Self {
        let mut set = Self::NONE;
        for &class in classes {
            set.set(class, true);
        }
        set
    }

    pub fn contains(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Digit => self.digits,
            CharacterClass::Symbol => self.symbols,
        }
    }

    pub fn set(&mut self, class: CharacterClass, on: bool) {
        match class {
            CharacterClass::Lowercase => self.lowercase = on,
            CharacterClass::Uppercase => self.uppercase = on,
            CharacterClass::Digit => self.digits = on,
            CharacterClass::Symbol => self.symbols = on,
        }
    }

    pub fn toggle(&mut self, class: CharacterClass) {
        self.set(class, !self.contains(class));
    }

    /// Enabled classes in fixed order: lowercase, uppercase, digit, symbol.
    pub fn iter(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |&class| self.contains(class))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ClassSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Union alphabet of every enabled class.
pub fn build(classes: &ClassSet) -> Vec<u8> {
    let mut chars = Vec::new();
    for class in classes.iter() {
        chars.extend_from_slice(class.alphabet());
    }
    chars
}

/// Size of the union alphabet (for entropy calculation).
pub fn size(classes: &ClassSet) -> usize {
    classes.iter().map(CharacterClass::size).sum()
}
