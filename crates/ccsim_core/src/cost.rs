//! Multi-resource cost vectors.
//!
//! All calculations use integer math.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource types a cost is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Tritanium.
    Tritanium,
    /// Duranium.
    Duranium,
    /// Molybdenum.
    Molybdenum,
    /// Money (megacredits).
    Money,
    /// Supplies.
    Supplies,
}

impl Resource {
    /// All resources in display order.
    pub const ALL: [Self; 5] = [
        Self::Tritanium,
        Self::Duranium,
        Self::Molybdenum,
        Self::Money,
        Self::Supplies,
    ];
}

/// Cost in minerals, money, and supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cost {
    /// Tritanium.
    #[serde(default)]
    pub tritanium: i32,
    /// Duranium.
    #[serde(default)]
    pub duranium: i32,
    /// Molybdenum.
    #[serde(default)]
    pub molybdenum: i32,
    /// Money (megacredits).
    #[serde(default)]
    pub money: i32,
    /// Supplies.
    #[serde(default)]
    pub supplies: i32,
}

impl Cost {
    /// Zero cost.
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0);

    /// Create a cost from all five components.
    #[must_use]
    pub const fn new(tritanium: i32, duranium: i32, molybdenum: i32, money: i32, supplies: i32) -> Self {
        Self {
            tritanium,
            duranium,
            molybdenum,
            money,
            supplies,
        }
    }

    /// Create a money-only cost.
    #[must_use]
    pub const fn money(amount: i32) -> Self {
        Self::new(0, 0, 0, amount, 0)
    }

    /// Get one component.
    #[must_use]
    pub const fn get(&self, resource: Resource) -> i32 {
        match resource {
            Resource::Tritanium => self.tritanium,
            Resource::Duranium => self.duranium,
            Resource::Molybdenum => self.molybdenum,
            Resource::Money => self.money,
            Resource::Supplies => self.supplies,
        }
    }

    /// Set one component.
    pub fn set(&mut self, resource: Resource, amount: i32) {
        match resource {
            Resource::Tritanium => self.tritanium = amount,
            Resource::Duranium => self.duranium = amount,
            Resource::Molybdenum => self.molybdenum = amount,
            Resource::Money => self.money = amount,
            Resource::Supplies => self.supplies = amount,
        }
    }

    /// Add to one component.
    pub fn add_to(&mut self, resource: Resource, amount: i32) {
        self.set(resource, self.get(resource) + amount);
    }

    /// Check whether all components are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.tritanium == 0
            && self.duranium == 0
            && self.molybdenum == 0
            && self.money == 0
            && self.supplies == 0
    }

    /// Parse a cost from the classic configuration syntax, e.g. `"T3 M2 $100"`.
    ///
    /// Recognized prefixes: `T`, `D`, `M`, `$`, `S`. A bare number means money.
    /// Returns `None` for malformed input.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut cost = Self::ZERO;
        for word in text.split_whitespace() {
            let mut chars = word.chars();
            let first = chars.next()?;
            let (resource, digits) = match first.to_ascii_uppercase() {
                'T' => (Resource::Tritanium, chars.as_str()),
                'D' => (Resource::Duranium, chars.as_str()),
                'M' => (Resource::Molybdenum, chars.as_str()),
                '$' => (Resource::Money, chars.as_str()),
                'S' => (Resource::Supplies, chars.as_str()),
                c if c.is_ascii_digit() => (Resource::Money, word),
                _ => return None,
            };
            let amount: i32 = digits.parse().ok()?;
            cost.add_to(resource, amount);
        }
        Some(cost)
    }
}

impl std::ops::Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.tritanium + rhs.tritanium,
            self.duranium + rhs.duranium,
            self.molybdenum + rhs.molybdenum,
            self.money + rhs.money,
            self.supplies + rhs.supplies,
        )
    }
}

impl std::ops::AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Mul<i32> for Cost {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(
            self.tritanium * rhs,
            self.duranium * rhs,
            self.molybdenum * rhs,
            self.money * rhs,
            self.supplies * rhs,
        )
    }
}

impl std::iter::Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            ("T", self.tritanium),
            ("D", self.duranium),
            ("M", self.molybdenum),
            ("$", self.money),
            ("S", self.supplies),
        ];
        let mut first = true;
        for (prefix, amount) in parts {
            if amount != 0 {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{prefix}{amount}")?;
                first = false;
            }
        }
        if first {
            write!(f, "$0")?;
        }
        Ok(())
    }
}
