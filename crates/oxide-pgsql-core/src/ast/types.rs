//! Type names.

use super::{Constant, Identifier, QualifiedName};

/// Fields allowed after `INTERVAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalMask {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    YearToMonth,
    DayToHour,
    DayToMinute,
    DayToSecond,
    HourToMinute,
    HourToSecond,
    MinuteToSecond,
}

impl IntervalMask {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::YearToMonth => "year to month",
            Self::DayToHour => "day to hour",
            Self::DayToMinute => "day to minute",
            Self::DayToSecond => "day to second",
            Self::HourToMinute => "hour to minute",
            Self::HourToSecond => "hour to second",
            Self::MinuteToSecond => "minute to second",
        }
    }

    /// Returns true if the mask ends with `SECOND`, which may take a precision.
    #[must_use]
    pub const fn ends_with_second(&self) -> bool {
        matches!(
            self,
            Self::Second | Self::DayToSecond | Self::HourToSecond | Self::MinuteToSecond
        )
    }
}

/// A type modifier: `varchar(10)`, `numeric(10, 2)`, `geometry(point)`.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeModifier {
    Constant(Constant),
    Identifier(Identifier),
}

/// The base of a type name.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNameKind {
    /// Any type referred to by name, SQL standard names already mapped to
    /// their `pg_catalog` equivalents.
    Named(QualifiedName),
    /// `INTERVAL` with an optional field mask.
    Interval(Option<IntervalMask>),
}

/// A type name as used in casts and column definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub kind: TypeNameKind,
    pub setof: bool,
    pub modifiers: Vec<TypeModifier>,
    /// Array bounds, `-1` standing for an unspecified one.
    pub bounds: Vec<i32>,
}

impl TypeName {
    /// Creates a type name without modifiers or array bounds.
    #[must_use]
    pub const fn new(name: QualifiedName) -> Self {
        Self {
            kind: TypeNameKind::Named(name),
            setof: false,
            modifiers: Vec::new(),
            bounds: Vec::new(),
        }
    }

    /// Creates a `pg_catalog` type name.
    #[must_use]
    pub fn catalog(name: &str) -> Self {
        Self::new(QualifiedName::with_schema("pg_catalog", name))
    }

    #[must_use]
    pub const fn interval(mask: Option<IntervalMask>) -> Self {
        Self {
            kind: TypeNameKind::Interval(mask),
            setof: false,
            modifiers: Vec::new(),
            bounds: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Vec<TypeModifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns the name, `None` for `INTERVAL`.
    #[must_use]
    pub const fn name(&self) -> Option<&QualifiedName> {
        match &self.kind {
            TypeNameKind::Named(name) => Some(name),
            TypeNameKind::Interval(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_type() {
        let int4 = TypeName::catalog("int4");
        assert_eq!(
            int4.name(),
            Some(&QualifiedName::with_schema("pg_catalog", "int4"))
        );
        assert!(TypeName::interval(None).name().is_none());
    }

    #[test]
    fn test_interval_mask() {
        assert_eq!(IntervalMask::DayToSecond.as_str(), "day to second");
        assert!(IntervalMask::MinuteToSecond.ends_with_second());
        assert!(!IntervalMask::YearToMonth.ends_with_second());
    }
}
