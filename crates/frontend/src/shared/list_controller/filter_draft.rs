//! Working copy of the filter form.
//!
//! Holds raw strings per field, validates each change and keeps one error per
//! field. Committed filters are only produced by [`FilterDraft::to_filters`],
//! which refuses while any error is present.

use chrono::NaiveDate;
use contracts::enums::{Broker, Category, Grade};
use contracts::shared::filters::{FilterField, TeaFilters};
use contracts::shared::validation::ValidationRules;
use std::collections::BTreeMap;

/// Select sentinel meaning "no constraint"
pub const ANY: &str = "any";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Choice(&'static [&'static str]),
    Date,
}

pub fn field_kind(field: FilterField) -> FieldKind {
    match field {
        FilterField::LotNo | FilterField::Mark | FilterField::SaleCode => FieldKind::Text,
        FilterField::Broker => FieldKind::Choice(Broker::CODES),
        FilterField::Grade => FieldKind::Choice(Grade::CODES),
        FilterField::Category => FieldKind::Choice(Category::CODES),
        FilterField::MinWeight
        | FilterField::MaxWeight
        | FilterField::MinPrice
        | FilterField::MaxPrice => FieldKind::Decimal,
        FilterField::DateFrom | FilterField::DateTo => FieldKind::Date,
        FilterField::UserId => FieldKind::Integer,
    }
}

fn field_rules(field: FilterField) -> ValidationRules {
    match field_kind(field) {
        FieldKind::Text => ValidationRules::max_length(64),
        FieldKind::Decimal => ValidationRules::non_negative(),
        FieldKind::Integer => ValidationRules {
            min: Some(1.0),
            ..ValidationRules::none()
        },
        FieldKind::Choice(_) | FieldKind::Date => ValidationRules::none(),
    }
}

/// (lower bound, upper bound) pairs checked against each other
const RANGES: &[(FilterField, FilterField)] = &[
    (FilterField::MinWeight, FilterField::MaxWeight),
    (FilterField::MinPrice, FilterField::MaxPrice),
    (FilterField::DateFrom, FilterField::DateTo),
];

fn is_unset(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case(ANY)
}

fn parse_number(raw: &str, field: FilterField) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("{} must be a number", field.label()))?;
    field_rules(field).validate_number(value, field.label())?;
    Ok(value)
}

fn parse_date(raw: &str, field: FilterField) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("{} must be a date (YYYY-MM-DD)", field.label()))
}

fn not_allowed(field: FilterField, allowed: &[&str]) -> String {
    format!("{} must be one of: {}", field.label(), allowed.join(", "))
}

/// Coerce `raw` and store it into `filters`. Unset values leave the field `None`.
fn assign(filters: &mut TeaFilters, field: FilterField, raw: &str) -> Result<(), String> {
    if is_unset(raw) {
        return Ok(());
    }
    let raw = raw.trim();
    match field {
        FilterField::LotNo | FilterField::Mark | FilterField::SaleCode => {
            field_rules(field).validate_string(raw, field.label())?;
            let value = Some(raw.to_string());
            match field {
                FilterField::LotNo => filters.lot_no = value,
                FilterField::Mark => filters.mark = value,
                _ => filters.sale_code = value,
            }
        }
        FilterField::Broker => {
            filters.broker =
                Some(Broker::from_code(raw).ok_or_else(|| not_allowed(field, Broker::CODES))?)
        }
        FilterField::Grade => {
            filters.grade =
                Some(Grade::from_code(raw).ok_or_else(|| not_allowed(field, Grade::CODES))?)
        }
        FilterField::Category => {
            filters.category = Some(
                Category::from_code(raw).ok_or_else(|| not_allowed(field, Category::CODES))?,
            )
        }
        FilterField::MinWeight => filters.min_weight = Some(parse_number(raw, field)?),
        FilterField::MaxWeight => filters.max_weight = Some(parse_number(raw, field)?),
        FilterField::MinPrice => filters.min_price = Some(parse_number(raw, field)?),
        FilterField::MaxPrice => filters.max_price = Some(parse_number(raw, field)?),
        FilterField::DateFrom => filters.date_from = Some(parse_date(raw, field)?),
        FilterField::DateTo => filters.date_to = Some(parse_date(raw, field)?),
        FilterField::UserId => {
            let id: i64 = raw
                .parse()
                .map_err(|_| format!("{} must be a whole number", field.label()))?;
            field_rules(field).validate_number(id as f64, field.label())?;
            filters.user_id = Some(id);
        }
    }
    Ok(())
}

/// `true` when the lower bound of a range is above its upper bound
fn range_inverted(filters: &TeaFilters, lo: FilterField, hi: FilterField) -> bool {
    match (lo, hi) {
        (FilterField::MinWeight, FilterField::MaxWeight) => {
            matches!((filters.min_weight, filters.max_weight), (Some(a), Some(b)) if a > b)
        }
        (FilterField::MinPrice, FilterField::MaxPrice) => {
            matches!((filters.min_price, filters.max_price), (Some(a), Some(b)) if a > b)
        }
        (FilterField::DateFrom, FilterField::DateTo) => {
            matches!((filters.date_from, filters.date_to), (Some(a), Some(b)) if a > b)
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterDraft {
    fields: Vec<FilterField>,
    values: BTreeMap<FilterField, String>,
    errors: BTreeMap<FilterField, String>,
}

impl FilterDraft {
    pub fn new(fields: &[FilterField]) -> Self {
        Self {
            fields: fields.to_vec(),
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn recognizes(&self, field: FilterField) -> bool {
        self.fields.contains(&field)
    }

    pub fn value(&self, field: FilterField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, field: FilterField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<FilterField, String> {
        &self.errors
    }

    /// Record a field change. Returns `false` for fields this draft does not own.
    pub fn set(&mut self, field: FilterField, raw: &str) -> bool {
        if !self.recognizes(field) {
            return false;
        }
        if raw.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, raw.to_string());
        }
        self.revalidate();
        true
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.errors.clear();
    }

    pub fn can_apply(&self) -> bool {
        self.errors.is_empty()
    }

    /// Typed filters, or the per-field errors blocking Apply.
    pub fn to_filters(&self) -> Result<TeaFilters, BTreeMap<FilterField, String>> {
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        let mut filters = TeaFilters::default();
        for (field, raw) in &self.values {
            // revalidate() already accepted every value
            let _ = assign(&mut filters, *field, raw);
        }
        Ok(filters)
    }

    fn revalidate(&mut self) {
        self.errors.clear();
        let mut parsed = TeaFilters::default();
        for (field, raw) in &self.values {
            if let Err(message) = assign(&mut parsed, *field, raw) {
                self.errors.insert(*field, message);
            }
        }
        for (lo, hi) in RANGES {
            if !self.recognizes(*lo) || !self.recognizes(*hi) {
                continue;
            }
            if range_inverted(&parsed, *lo, *hi) && !self.errors.contains_key(hi) {
                self.errors.insert(
                    *hi,
                    format!("{} must not be less than {}", hi.label(), lo.label()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FilterField] = &[
        FilterField::LotNo,
        FilterField::Grade,
        FilterField::Broker,
        FilterField::MinWeight,
        FilterField::MaxWeight,
        FilterField::DateFrom,
        FilterField::DateTo,
    ];

    #[test]
    fn non_numeric_weight_blocks_apply() {
        let mut draft = FilterDraft::new(FIELDS);
        draft.set(FilterField::MinWeight, "abc");
        assert_eq!(draft.error(FilterField::MinWeight), Some("Min weight (kg) must be a number"));
        assert!(!draft.can_apply());
        assert!(draft.to_filters().is_err());

        draft.set(FilterField::MinWeight, "120.5");
        assert!(draft.can_apply());
        assert_eq!(draft.to_filters().unwrap().min_weight, Some(120.5));
    }

    #[test]
    fn nan_and_negative_are_rejected() {
        let mut draft = FilterDraft::new(FIELDS);
        draft.set(FilterField::MinWeight, "NaN");
        assert!(draft.error(FilterField::MinWeight).is_some());
        draft.set(FilterField::MinWeight, "-5");
        assert_eq!(
            draft.error(FilterField::MinWeight),
            Some("Min weight (kg) must be at least 0")
        );
    }

    #[test]
    fn any_sentinel_means_unset() {
        let mut draft = FilterDraft::new(FIELDS);
        draft.set(FilterField::Grade, ANY);
        draft.set(FilterField::Broker, "jk");
        let filters = draft.to_filters().unwrap();
        assert_eq!(filters.grade, None);
        assert_eq!(filters.broker, Some(Broker::JohnKeells));
    }

    #[test]
    fn unknown_enum_value_reports_allowed_list() {
        let mut draft = FilterDraft::new(FIELDS);
        draft.set(FilterField::Grade, "XYZ");
        let error = draft.error(FilterField::Grade).unwrap();
        assert!(error.starts_with("Grade must be one of: OP, OP1"));
    }

    #[test]
    fn bad_date_and_inverted_range() {
        let mut draft = FilterDraft::new(FIELDS);
        draft.set(FilterField::DateFrom, "2024-13-01");
        assert!(draft.error(FilterField::DateFrom).is_some());

        draft.set(FilterField::DateFrom, "2024-05-01");
        draft.set(FilterField::DateTo, "2024-04-01");
        assert_eq!(
            draft.error(FilterField::DateTo),
            Some("Date to must not be less than Date from")
        );

        draft.set(FilterField::DateTo, "");
        assert!(draft.can_apply());
    }

    #[test]
    fn weight_range_checked_once_both_sides_parse() {
        let mut draft = FilterDraft::new(FIELDS);
        draft.set(FilterField::MinWeight, "500");
        draft.set(FilterField::MaxWeight, "100");
        assert!(draft.error(FilterField::MaxWeight).is_some());
        draft.set(FilterField::MinWeight, "50");
        assert!(draft.can_apply());
    }

    #[test]
    fn ignores_fields_it_does_not_own() {
        let mut draft = FilterDraft::new(FIELDS);
        assert!(!draft.set(FilterField::UserId, "x"));
        assert!(draft.can_apply());
    }
}
