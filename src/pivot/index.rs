use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{Contract, OptionType};

type QuoteKey = (NaiveDate, Decimal, OptionType);

/// Filtered contracts grouped by (expiry, strike, type), built once before
/// the matrix is filled.
///
/// Duplicate keys keep the first contract in normalized-table order.
/// Strikes compare numerically, so `100` and `100.0` share a row whose
/// label is the first spelling seen.
pub struct QuoteIndex<'a> {
    quotes: HashMap<QuoteKey, &'a Contract>,
    strikes: Vec<Decimal>,
    expiries: Vec<NaiveDate>,
    duplicates: usize,
}

impl<'a> QuoteIndex<'a> {
    pub fn build(contracts: impl IntoIterator<Item = &'a Contract>) -> Self {
        let mut quotes = HashMap::new();
        let mut strikes = BTreeSet::new();
        let mut expiries = BTreeSet::new();
        let mut duplicates = 0;

        for contract in contracts {
            strikes.insert(contract.strike);
            expiries.insert(contract.expiry_date);
            let key = (contract.expiry_date, contract.strike, contract.option_type);
            if quotes.contains_key(&key) {
                duplicates += 1;
            } else {
                quotes.insert(key, contract);
            }
        }

        QuoteIndex {
            quotes,
            strikes: strikes.into_iter().collect(),
            expiries: expiries.into_iter().collect(),
            duplicates,
        }
    }

    /// Ascending, numerically distinct.
    pub fn strikes(&self) -> &[Decimal] {
        &self.strikes
    }

    /// Ascending, distinct.
    pub fn expiries(&self) -> &[NaiveDate] {
        &self.expiries
    }

    /// Contracts shadowed by an earlier one with the same key.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn get(
        &self,
        expiry: NaiveDate,
        strike: Decimal,
        option_type: OptionType,
    ) -> Option<&'a Contract> {
        self.quotes.get(&(expiry, strike, option_type)).copied()
    }
}
