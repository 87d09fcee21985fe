//! Which character classes can cast a spell.
//!
//! The class list is not on the cards, so it comes from the operator (or a
//! sidecar file for unattended runs). Only full cards are asked about.

use crate::error::SpellbookError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

/// The closed class vocabulary, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
    Artificer,
}

impl SpellClass {
    pub const ALL: [SpellClass; 13] = [
        SpellClass::Barbarian,
        SpellClass::Bard,
        SpellClass::Cleric,
        SpellClass::Druid,
        SpellClass::Fighter,
        SpellClass::Monk,
        SpellClass::Paladin,
        SpellClass::Ranger,
        SpellClass::Rogue,
        SpellClass::Sorcerer,
        SpellClass::Warlock,
        SpellClass::Wizard,
        SpellClass::Artificer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpellClass::Barbarian => "Barbarian",
            SpellClass::Bard => "Bard",
            SpellClass::Cleric => "Cleric",
            SpellClass::Druid => "Druid",
            SpellClass::Fighter => "Fighter",
            SpellClass::Monk => "Monk",
            SpellClass::Paladin => "Paladin",
            SpellClass::Ranger => "Ranger",
            SpellClass::Rogue => "Rogue",
            SpellClass::Sorcerer => "Sorcerer",
            SpellClass::Warlock => "Warlock",
            SpellClass::Wizard => "Wizard",
            SpellClass::Artificer => "Artificer",
        }
    }

    /// The class at 1-based menu position `n`.
    pub fn from_menu_number(n: usize) -> Option<SpellClass> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for SpellClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpellClass {
    type Err = String;

    /// Case-insensitive class name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown class '{s}'"))
    }
}

/// `[1]Barbarian  [2]Bard  …  [13]Artificer`
pub fn class_menu() -> String {
    SpellClass::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[{}]{}", i + 1, c))
        .collect::<Vec<_>>()
        .join("  ")
}

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Pick classes from free text: every run of digits is a 1-based menu
/// number. Out-of-range numbers and anything that is not a digit are
/// ignored; repeats keep their first position.
pub fn parse_class_picks(raw: &str) -> Vec<SpellClass> {
    let mut picks = Vec::new();
    for m in NUMBER.find_iter(raw) {
        let Some(class) = m
            .as_str()
            .parse::<usize>()
            .ok()
            .and_then(SpellClass::from_menu_number)
        else {
            continue;
        };
        if !picks.contains(&class) {
            picks.push(class);
        }
    }
    picks
}

/// Source of the class list for a full card.
pub trait ClassPrompt {
    fn collect_classes(&mut self, spell_name: &str) -> Result<Vec<SpellClass>, SpellbookError>;
}

/// Interactive numbered-menu prompt over any line reader/writer pair.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ClassPrompt for TerminalPrompt<R, W> {
    fn collect_classes(&mut self, spell_name: &str) -> Result<Vec<SpellClass>, SpellbookError> {
        let io_err = |e: std::io::Error| SpellbookError::PromptFailed(e.to_string());

        writeln!(self.output, "\n  📜 {spell_name}").map_err(io_err)?;
        writeln!(self.output, "  {}", class_menu()).map_err(io_err)?;
        write!(self.output, "  Classes (numbers, e.g. 10 12): ").map_err(io_err)?;
        self.output.flush().map_err(io_err)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(io_err)?;
        let picks = parse_class_picks(&line);

        if !line.trim().is_empty() {
            let names: Vec<&str> = picks.iter().map(|c| c.as_str()).collect();
            writeln!(self.output, "  → {}", names.join(", ")).map_err(io_err)?;
        }
        Ok(picks)
    }
}

/// Never asks; every spell gets no classes.
pub struct NoPrompt;

impl ClassPrompt for NoPrompt {
    fn collect_classes(&mut self, _spell_name: &str) -> Result<Vec<SpellClass>, SpellbookError> {
        Ok(Vec::new())
    }
}

/// Classes looked up by spell name in a JSON object
/// `{ "Magic Missile": ["Sorcerer", "Wizard"] }`.
///
/// Spells missing from the file get no classes.
#[derive(Debug, Default)]
pub struct SidecarPrompt {
    classes: HashMap<String, Vec<SpellClass>>,
}

impl SidecarPrompt {
    pub fn from_file(path: &Path) -> Result<Self, SpellbookError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SpellbookError::PromptFailed(format!("reading {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SpellbookError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(text)
            .map_err(|e| SpellbookError::PromptFailed(format!("class sidecar: {e}")))?;

        let classes = raw
            .into_iter()
            .map(|(spell, names)| {
                let parsed = names
                    .iter()
                    .filter_map(|n| match n.parse::<SpellClass>() {
                        Ok(c) => Some(c),
                        Err(e) => {
                            warn!("Ignoring class for '{spell}': {e}");
                            None
                        }
                    })
                    .fold(Vec::new(), |mut acc, c| {
                        if !acc.contains(&c) {
                            acc.push(c);
                        }
                        acc
                    });
                (spell.trim().to_string(), parsed)
            })
            .collect();
        Ok(Self { classes })
    }
}

impl ClassPrompt for SidecarPrompt {
    fn collect_classes(&mut self, spell_name: &str) -> Result<Vec<SpellClass>, SpellbookError> {
        Ok(self.classes.get(spell_name).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn menu_lists_thirteen_classes_in_order() {
        let menu = class_menu();
        assert!(menu.starts_with("[1]Barbarian  [2]Bard"));
        assert!(menu.ends_with("[12]Wizard  [13]Artificer"));
    }

    #[test]
    fn picks_from_numbers() {
        assert_eq!(
            parse_class_picks("10 12"),
            vec![SpellClass::Sorcerer, SpellClass::Wizard]
        );
    }

    #[test]
    fn picks_ignore_out_of_range_and_noise() {
        assert_eq!(
            parse_class_picks("0, 3; 14 abc 99 -2"),
            vec![SpellClass::Cleric, SpellClass::Bard]
        );
    }

    #[test]
    fn picks_dedupe_keeping_first_position() {
        assert_eq!(
            parse_class_picks("12 3 12"),
            vec![SpellClass::Wizard, SpellClass::Cleric]
        );
    }

    #[test]
    fn empty_answer_is_empty_set() {
        assert!(parse_class_picks("").is_empty());
        assert!(parse_class_picks("   ").is_empty());
    }

    #[test]
    fn terminal_prompt_reads_one_line() {
        let input = Cursor::new(b"4 8\nleftover\n".to_vec());
        let mut output = Vec::new();
        let picks = TerminalPrompt::new(input, &mut output)
            .collect_classes("Goodberry")
            .unwrap();
        assert_eq!(picks, vec![SpellClass::Druid, SpellClass::Ranger]);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Goodberry"));
        assert!(shown.contains("[13]Artificer"));
        assert!(shown.contains("→ Druid, Ranger"));
    }

    #[test]
    fn terminal_prompt_at_eof_is_empty() {
        let mut output = Vec::new();
        let picks = TerminalPrompt::new(Cursor::new(Vec::new()), &mut output)
            .collect_classes("Light")
            .unwrap();
        assert!(picks.is_empty());
    }

    #[test]
    fn class_names_parse_case_insensitively() {
        assert_eq!("wizard".parse::<SpellClass>(), Ok(SpellClass::Wizard));
        assert!("Necromancer".parse::<SpellClass>().is_err());
    }

    #[test]
    fn sidecar_looks_up_by_name() {
        let mut prompt = SidecarPrompt::from_json(
            r#"{ "Magic Missile": ["sorcerer", "Wizard", "Wizard", "Necromancer"] }"#,
        )
        .unwrap();
        assert_eq!(
            prompt.collect_classes("Magic Missile").unwrap(),
            vec![SpellClass::Sorcerer, SpellClass::Wizard]
        );
        assert!(prompt.collect_classes("Light").unwrap().is_empty());
    }

    #[test]
    fn sidecar_rejects_malformed_json() {
        let err = SidecarPrompt::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, SpellbookError::PromptFailed(_)));
    }
}
