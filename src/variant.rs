//! Supported spreadsheet layouts and their mapping onto canonical fields.

use crate::model::table::header_matches;
use crate::model::PriceField;

/// Canonical fields of a normalized contract table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    OptionTicker,
    Symbol,
    ExpiryDate,
    OptionType,
    Strike,
    Style,
    LastPrice,
    Bid,
    Ask,
    Volume,
    OpenInterest,
}

/// Value constraint attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, kept as-is.
    Text,
    /// Free text, upper-cased during normalization.
    Upper,
    Date,
    OptionType,
    /// Decimal that must not be negative.
    Quantity,
    /// Decimal; non-positive values mean "no quote".
    Price,
}

/// Derived column holding `option_ticker` minus its prefix.
pub const SHORT_TICKER: &str = "short_ticker";
/// Derived column holding `(bid + ask) / 2`.
pub const MID_PRICE: &str = "mid_price";
/// Characters stripped from the front of an option ticker.
pub const TICKER_PREFIX_LEN: usize = 4;

impl Field {
    pub fn canonical_name(self) -> &'static str {
        match self {
            Field::OptionTicker => "option_ticker",
            Field::Symbol => "symbol",
            Field::ExpiryDate => "expiry_date",
            Field::OptionType => "option_type",
            Field::Strike => "strike",
            Field::Style => "style",
            Field::LastPrice => "last_price",
            Field::Bid => "bid",
            Field::Ask => "ask",
            Field::Volume => "volume",
            Field::OpenInterest => "open_interest",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::OptionTicker => FieldKind::Text,
            Field::Symbol | Field::Style => FieldKind::Upper,
            Field::ExpiryDate => FieldKind::Date,
            Field::OptionType => FieldKind::OptionType,
            Field::Strike | Field::Volume | Field::OpenInterest => FieldKind::Quantity,
            Field::LastPrice | Field::Bid | Field::Ask => FieldKind::Price,
        }
    }

    /// Fields every row needs to be placed in the matrix.
    pub fn is_key(self) -> bool {
        matches!(
            self,
            Field::Symbol | Field::ExpiryDate | Field::OptionType | Field::Strike
        )
    }
}

/// One source column of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Header as it appears in the source file.
    pub source: &'static str,
    pub field: Field,
    pub required: bool,
}

const fn required(source: &'static str, field: Field) -> FieldSpec {
    FieldSpec {
        source,
        field,
        required: true,
    }
}

const fn optional(source: &'static str, field: Field) -> FieldSpec {
    FieldSpec {
        source,
        field,
        required: false,
    }
}

const BROKER_EXTRACT: &[FieldSpec] = &[
    required("TckrSymb", Field::OptionTicker),
    required("Asst", Field::Symbol),
    required("XprtnDt", Field::ExpiryDate),
    required("OptnTp", Field::OptionType),
    required("ExrcPric", Field::Strike),
    required("OptnStyle", Field::Style),
    required("Last", Field::LastPrice),
    optional("TtlTradgVol", Field::Volume),
    optional("OpnIntrst", Field::OpenInterest),
];

const GENERIC: &[FieldSpec] = &[
    required("symbol", Field::Symbol),
    required("expiry_date", Field::ExpiryDate),
    required("strike", Field::Strike),
    required("option_type", Field::OptionType),
    required("bid", Field::Bid),
    required("ask", Field::Ask),
    required("volume", Field::Volume),
    required("open_interest", Field::OpenInterest),
    optional("option_ticker", Field::OptionTicker),
    optional("style", Field::Style),
    optional("last_price", Field::LastPrice),
];

/// A supported raw layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVariant {
    /// Exchange extract read from the `Select` sheet.
    BrokerExtract,
    /// Snake-case quote dump with bid/ask/volume/open interest.
    Generic,
}

impl SchemaVariant {
    /// Detection order: first full match wins.
    pub const ALL: [SchemaVariant; 2] = [SchemaVariant::BrokerExtract, SchemaVariant::Generic];

    pub fn name(self) -> &'static str {
        match self {
            SchemaVariant::BrokerExtract => "broker extract",
            SchemaVariant::Generic => "generic",
        }
    }

    /// Sheet the layout is read from, `None` for the workbook's default.
    pub fn sheet_name(self) -> Option<&'static str> {
        match self {
            SchemaVariant::BrokerExtract => Some("Select"),
            SchemaVariant::Generic => None,
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            SchemaVariant::BrokerExtract => BROKER_EXTRACT,
            SchemaVariant::Generic => GENERIC,
        }
    }

    pub fn required_fields(self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields().iter().filter(|s| s.required)
    }

    pub fn default_price(self) -> PriceField {
        match self {
            SchemaVariant::BrokerExtract => PriceField::Last,
            SchemaVariant::Generic => PriceField::Mid,
        }
    }

    /// Number of required columns present in `headers`.
    pub fn coverage(self, headers: &[String]) -> usize {
        self.required_fields()
            .filter(|spec| find_column(headers, spec).is_some())
            .count()
    }

    /// First layout whose required columns are all present.
    pub fn detect(headers: &[String]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.coverage(headers) == v.required_fields().count())
    }

    /// Layout with the most required columns present; ties go to the
    /// earlier entry of `ALL`. Used to report what is missing when
    /// detection fails.
    pub fn closest(headers: &[String]) -> Self {
        let mut best = SchemaVariant::BrokerExtract;
        let mut best_coverage = best.coverage(headers);
        for v in Self::ALL.into_iter().skip(1) {
            let c = v.coverage(headers);
            if c > best_coverage {
                best = v;
                best_coverage = c;
            }
        }
        best
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Column holding `spec`: its source header, or the canonical name once
/// the table has been normalized.
pub fn find_column(headers: &[String], spec: &FieldSpec) -> Option<usize> {
    headers
        .iter()
        .position(|h| header_matches(h, spec.source))
        .or_else(|| {
            headers
                .iter()
                .position(|h| header_matches(h, spec.field.canonical_name()))
        })
}
