use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use thiserror::Error;

/// Coin denominations in cents, largest first.
const DENOMINATIONS: [u32; 4] = [25, 10, 5, 1];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChangeError {
    #[error("Amount cannot be negative")]
    NegativeAmount,
}

/// Splits `amount` cents into quarters, dimes, nickels and pennies, using as few coins as
/// possible. The map has an entry for every denomination, including those with a count of zero.
pub fn change(amount: i64) -> Result<BTreeMap<u32, i64>, ChangeError> {
    if amount < 0 {
        return Err(ChangeError::NegativeAmount);
    }
    let mut counts = BTreeMap::new();
    let mut remaining = amount;
    for denomination in DENOMINATIONS {
        let denomination_cents = i64::from(denomination);
        counts.insert(denomination, remaining / denomination_cents);
        remaining %= denomination_cents;
    }
    Ok(counts)
}

/// Returns the first string accepted by `predicate`, lower-cased.
pub fn first_then_lower_case<I, S, P>(strings: I, mut predicate: P) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: FnMut(&str) -> bool,
{
    strings
        .into_iter()
        .find(|s| predicate(s.as_ref()))
        .map(|s| s.as_ref().to_lowercase())
}

/// Lazily yields `base^0, base^1, base^2, ...` for as long as the power does not exceed `limit`.
///
/// The sequence also ends when the next power would overflow `i64`. Bases whose powers never
/// exceed the limit, such as 1 or 0, give an endless sequence.
pub fn powers(base: i64, limit: i64) -> Powers {
    Powers {
        base,
        limit,
        next: Some(1),
    }
}

#[derive(Debug, Clone)]
pub struct Powers {
    base: i64,
    limit: i64,
    next: Option<i64>,
}

impl Iterator for Powers {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let power = self.next.filter(|power| *power <= self.limit)?;
        self.next = power.checked_mul(self.base);
        Some(power)
    }
}

/// A sentence built one word at a time: `say("hello").and("my").and("friend")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sayer {
    words: Vec<String>,
}

pub fn say(word: impl Into<String>) -> Sayer {
    Sayer::default().and(word)
}

impl Sayer {
    pub fn and(mut self, word: impl Into<String>) -> Sayer {
        self.words.push(word.into());
        self
    }

    /// The words joined by single spaces. Empty words still take part in the joining, so
    /// `say("a").and("").and("b")` reads `"a  b"`.
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}

impl fmt::Display for Sayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

/// Counts the lines of a file that are neither blank nor `#` comments.
pub fn meaningful_line_count(path: impl AsRef<Path>) -> Result<usize, anyhow::Error> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut count = 0;
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("Cannot read {}", path.display()))?;
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            count += 1;
        }
    }
    log::debug!("{} meaningful lines in {}", count, path.display());
    Ok(count)
}
