use regex::Regex;

use crate::table::RawRow;

re!(re_amount_header, r"(?i)amount|debit|value|cost");
re!(re_description_header, r"(?i)desc|memo|narrative|detail");
re!(re_date_header, r"(?i)date");

/// The part a column plays in a statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Amount,
    Description,
    Date,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 3] = [ColumnRole::Amount, ColumnRole::Description, ColumnRole::Date];

    pub fn pattern(self) -> &'static Regex {
        match self {
            ColumnRole::Amount => re_amount_header(),
            ColumnRole::Description => re_description_header(),
            ColumnRole::Date => re_date_header(),
        }
    }

    pub fn matches(self, header: &str) -> bool {
        self.pattern().is_match(header)
    }

    /// First key, in row order, whose name fits this role.
    pub fn find<'a>(self, mut keys: impl Iterator<Item = &'a str>) -> Option<&'a str> {
        keys.find(|k| self.matches(k))
    }
}

/// Which key of a row holds each role. Resolved per row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap<'a> {
    pub amount: Option<&'a str>,
    pub description: Option<&'a str>,
    pub date: Option<&'a str>,
}

impl<'a> ColumnMap<'a> {
    pub fn sniff(row: &'a RawRow) -> Self {
        ColumnMap {
            amount: ColumnRole::Amount.find(row.keys()),
            description: ColumnRole::Description.find(row.keys()),
            date: ColumnRole::Date.find(row.keys()),
        }
    }

    pub fn get(&self, role: ColumnRole) -> Option<&'a str> {
        match role {
            ColumnRole::Amount => self.amount,
            ColumnRole::Description => self.description,
            ColumnRole::Date => self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_patterns() {
        for header in ["Amount", "DEBIT", "Debit Amount", "Transaction Value", "cost"] {
            assert!(ColumnRole::Amount.matches(header), "{header}");
        }
        assert!(!ColumnRole::Amount.matches("Balance"));
    }

    #[test]
    fn description_patterns() {
        for header in ["Description", "Memo", "NARRATIVE", "Transaction Details", "desc"] {
            assert!(ColumnRole::Description.matches(header), "{header}");
        }
        assert!(!ColumnRole::Description.matches("Narration"));
    }

    #[test]
    fn date_pattern() {
        assert!(ColumnRole::Date.matches("Txn Date"));
        assert!(ColumnRole::Date.matches("posting_DATE"));
        assert!(!ColumnRole::Date.matches("When"));
    }

    #[test]
    fn find_takes_first_in_key_order() {
        let keys = ["Value Date", "Amount"];
        assert_eq!(ColumnRole::Amount.find(keys.into_iter()), Some("Value Date"));
        assert_eq!(ColumnRole::Date.find(keys.into_iter()), Some("Value Date"));
    }

    #[test]
    fn sniff_row() {
        let row = RawRow::from_pairs([
            ("Date", "2024-01-12"),
            ("Description", "NETFLIX.COM"),
            ("Debit", "649.00"),
            ("Balance", "10000"),
        ]);
        let map = ColumnMap::sniff(&row);
        assert_eq!(map.amount, Some("Debit"));
        assert_eq!(map.description, Some("Description"));
        assert_eq!(map.date, Some("Date"));
    }

    #[test]
    fn sniff_row_missing_roles() {
        let row = RawRow::from_pairs([("Payee", "spotify"), ("Balance", "1")]);
        let map = ColumnMap::sniff(&row);
        assert_eq!(map, ColumnMap::default());
        for role in ColumnRole::ALL {
            assert!(map.get(role).is_none());
        }
    }
}
