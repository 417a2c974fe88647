use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A progressive tax band: marginal rate applied above `floor`.
///
/// `cumulative` is the total tax accrued by all bands below the floor, so
/// the tax on a chargeable income within the band is
/// `cumulative + (chargeable - floor) * rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub floor: Decimal,
    /// Upper bound of the band; `None` for the top band.
    pub ceiling: Option<Decimal>,
    pub rate: Decimal,
    pub cumulative: Decimal,
}

/// Personal Income Tax Act bands, in force since the 2011 amendment.
static PITA_BANDS: &[Band] = &[
    Band {
        floor: dec!(0),
        ceiling: Some(dec!(300000)),
        rate: dec!(0.07),
        cumulative: dec!(0),
    },
    Band {
        floor: dec!(300000),
        ceiling: Some(dec!(600000)),
        rate: dec!(0.11),
        cumulative: dec!(21000),
    },
    Band {
        floor: dec!(600000),
        ceiling: Some(dec!(1100000)),
        rate: dec!(0.15),
        cumulative: dec!(54000),
    },
    Band {
        floor: dec!(1100000),
        ceiling: Some(dec!(1600000)),
        rate: dec!(0.19),
        cumulative: dec!(129000),
    },
    Band {
        floor: dec!(1600000),
        ceiling: None,
        rate: dec!(0.21),
        cumulative: dec!(224000),
    },
];

/// Nigerian tax year (calendar year, 1 January to 31 December)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        TaxYear(date.year())
    }

    /// Start date of the tax year (1 January)
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 1, 1).unwrap()
    }

    /// End date of the tax year (31 December)
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 12, 31).unwrap()
    }

    /// Display as "2024" format
    pub fn display(&self) -> String {
        self.0.to_string()
    }

    /// Progressive band table for this tax year. A single parameter set
    /// today; new arms go here when a Finance Act changes the rates.
    pub fn bands(&self) -> &'static [Band] {
        PITA_BANDS
    }

    /// Band applying to a chargeable income: the band with the highest
    /// floor <= chargeable. A value exactly on a boundary belongs to the
    /// lower band (the cumulative table makes both readings agree).
    pub fn band_for(&self, chargeable: Decimal) -> &'static Band {
        self.bands()
            .iter()
            .rev()
            .find(|band| band.floor <= chargeable)
            .unwrap_or(&self.bands()[0])
    }

    /// Fixed floor of the Consolidated Relief Allowance
    pub fn cra_floor(&self) -> Decimal {
        dec!(200000)
    }

    /// CRA base component: the greater of this rate on gross or the floor
    pub fn cra_base_rate(&self) -> Decimal {
        dec!(0.01)
    }

    /// CRA gross component rate, added on top of the base component
    pub fn cra_gross_rate(&self) -> Decimal {
        dec!(0.20)
    }

    /// Relief per dependent, subtracted from tax (not from income)
    pub fn dependent_relief(&self) -> Decimal {
        dec!(2500)
    }

    /// Dependents beyond this count attract no further relief
    pub fn max_relieved_dependents(&self) -> u32 {
        10
    }

    /// Flat relief for disabled taxpayers, subtracted from tax
    pub fn disability_relief(&self) -> Decimal {
        dec!(50000)
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
