use crate::filing::TaxInput;
use crate::tax::ng::TaxYear;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band's share of an assessment, for detailed reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandLine {
    pub floor: Decimal,
    pub ceiling: Option<Decimal>,
    pub rate: Decimal,
    /// Portion of chargeable income taxed at this band's rate
    pub taxed_amount: Decimal,
    pub tax: Decimal,
}

/// Result of a PAYE assessment. Derived values only, recomputed fresh on
/// every call; amounts carry full precision and are rounded at display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAssessment {
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub consolidated_relief: Decimal,
    pub chargeable_income: Decimal,
    pub dependent_relief: Decimal,
    pub disability_relief: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    /// Annual tax as a percentage of gross income
    pub effective_tax_rate: Decimal,
    pub net_income: Decimal,
    pub band_lines: Vec<BandLine>,
}

/// Progressive tax on a chargeable income, before personal reliefs
pub fn progressive_tax(year: TaxYear, chargeable: Decimal) -> Decimal {
    if chargeable <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let band = year.band_for(chargeable);
    band.cumulative + (chargeable - band.floor) * band.rate
}

/// Per-band breakdown of the progressive tax on a chargeable income
fn band_breakdown(year: TaxYear, chargeable: Decimal) -> Vec<BandLine> {
    let mut lines = Vec::new();
    for band in year.bands() {
        if chargeable <= band.floor {
            break;
        }
        let top = match band.ceiling {
            Some(ceiling) => chargeable.min(ceiling),
            None => chargeable,
        };
        let taxed_amount = top - band.floor;
        lines.push(BandLine {
            floor: band.floor,
            ceiling: band.ceiling,
            rate: band.rate,
            taxed_amount,
            tax: taxed_amount * band.rate,
        });
    }
    lines
}

/// Assess PAYE tax for one filing.
///
/// Pure and total: negative amounts are clamped to zero before
/// computation, and the dependent count is capped at the year's
/// relieved maximum. No storage is read or written.
pub fn assess(input: &TaxInput, year: TaxYear) -> TaxAssessment {
    let basic = input.basic_salary.max(Decimal::ZERO);
    let housing = input.housing_allowance.max(Decimal::ZERO);
    let transport = input.transport_allowance.max(Decimal::ZERO);
    let other = input.other_allowances.max(Decimal::ZERO);
    let pension = input.pension_contribution.max(Decimal::ZERO);
    let nhf = input.nhf_contribution.max(Decimal::ZERO);
    let life_insurance = input.life_insurance_premium.max(Decimal::ZERO);

    let gross_income = basic + housing + transport + other;
    let total_deductions = pension + nhf + life_insurance;

    let consolidated_relief = (gross_income * year.cra_base_rate()).max(year.cra_floor())
        + gross_income * year.cra_gross_rate();

    let chargeable_income =
        (gross_income - consolidated_relief - total_deductions).max(Decimal::ZERO);

    let banded_tax = progressive_tax(year, chargeable_income);
    log::debug!(
        "assessment {}: gross={}, cra={}, deductions={}, chargeable={}, banded tax={}",
        year,
        gross_income,
        consolidated_relief,
        total_deductions,
        chargeable_income,
        banded_tax
    );

    let relieved_dependents = input
        .number_of_dependents
        .min(year.max_relieved_dependents());
    let dependent_relief = Decimal::from(relieved_dependents) * year.dependent_relief();
    let disability_relief = if input.is_disabled {
        year.disability_relief()
    } else {
        Decimal::ZERO
    };

    // Reliefs reduce the tax itself and must not push it below zero
    let annual_tax = (banded_tax - dependent_relief - disability_relief).max(Decimal::ZERO);
    let monthly_tax = annual_tax / Decimal::from(12);
    let effective_tax_rate = if gross_income > Decimal::ZERO {
        annual_tax / gross_income * Decimal::from(100)
    } else {
        Decimal::ZERO
    };
    let net_income = gross_income - annual_tax;

    TaxAssessment {
        gross_income,
        total_deductions,
        consolidated_relief,
        chargeable_income,
        dependent_relief,
        disability_relief,
        annual_tax,
        monthly_tax,
        effective_tax_rate,
        net_income,
        band_lines: band_breakdown(year, chargeable_income),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(basic: Decimal) -> TaxInput {
        TaxInput {
            basic_salary: basic,
            ..TaxInput::default()
        }
    }

    const YEAR: TaxYear = TaxYear(2024);

    #[test]
    fn worked_example_one_million() {
        // cra = max(10,000, 200,000) + 200,000 = 400,000
        // chargeable = 600,000, tax = 21,000 + 300,000 * 11% = 54,000
        let assessment = assess(&input(dec!(1000000)), YEAR);
        assert_eq!(assessment.gross_income, dec!(1000000));
        assert_eq!(assessment.consolidated_relief, dec!(400000));
        assert_eq!(assessment.chargeable_income, dec!(600000));
        assert_eq!(assessment.annual_tax, dec!(54000));
        assert_eq!(assessment.monthly_tax, dec!(4500));
        assert_eq!(assessment.net_income, dec!(946000));
        assert_eq!(assessment.effective_tax_rate, dec!(5.4));
    }

    #[test]
    fn band_boundary_continuity() {
        // The cumulative table must reproduce exactly at each boundary
        assert_eq!(progressive_tax(YEAR, dec!(300000)), dec!(21000));
        assert_eq!(progressive_tax(YEAR, dec!(600000)), dec!(54000));
        assert_eq!(progressive_tax(YEAR, dec!(1100000)), dec!(129000));
        assert_eq!(progressive_tax(YEAR, dec!(1600000)), dec!(224000));
    }

    #[test]
    fn progressive_tax_below_first_ceiling() {
        assert_eq!(progressive_tax(YEAR, dec!(100000)), dec!(7000));
    }

    #[test]
    fn progressive_tax_top_band() {
        // 224,000 + 400,000 * 21%
        assert_eq!(progressive_tax(YEAR, dec!(2000000)), dec!(308000));
    }

    #[test]
    fn progressive_tax_zero_and_negative() {
        assert_eq!(progressive_tax(YEAR, dec!(0)), dec!(0));
        assert_eq!(progressive_tax(YEAR, dec!(-5000)), dec!(0));
    }

    #[test]
    fn breakdown_sums_to_banded_tax() {
        for chargeable in [dec!(150000), dec!(450000), dec!(800000), dec!(3000000)] {
            let lines = band_breakdown(YEAR, chargeable);
            let total: Decimal = lines.iter().map(|line| line.tax).sum();
            assert_eq!(total, progressive_tax(YEAR, chargeable));
            let taxed: Decimal = lines.iter().map(|line| line.taxed_amount).sum();
            assert_eq!(taxed, chargeable);
        }
    }

    #[test]
    fn breakdown_empty_when_nothing_chargeable() {
        assert!(band_breakdown(YEAR, dec!(0)).is_empty());
    }

    #[test]
    fn zero_input_assesses_to_zero() {
        let assessment = assess(&TaxInput::default(), YEAR);
        assert_eq!(assessment.gross_income, dec!(0));
        assert_eq!(assessment.annual_tax, dec!(0));
        assert_eq!(assessment.net_income, dec!(0));
        assert_eq!(assessment.effective_tax_rate, dec!(0));
    }

    #[test]
    fn negative_amounts_clamped_before_computation() {
        let negative = TaxInput {
            basic_salary: dec!(-500000),
            housing_allowance: dec!(-1),
            ..TaxInput::default()
        };
        assert_eq!(assess(&negative, YEAR), assess(&TaxInput::default(), YEAR));
    }

    #[test]
    fn gross_income_sums_all_income_fields() {
        let filing = TaxInput {
            basic_salary: dec!(1200000),
            housing_allowance: dec!(300000),
            transport_allowance: dec!(150000),
            other_allowances: dec!(50000),
            ..TaxInput::default()
        };
        assert_eq!(assess(&filing, YEAR).gross_income, dec!(1700000));
    }

    #[test]
    fn deductions_reduce_chargeable_income() {
        let with_pension = TaxInput {
            basic_salary: dec!(1000000),
            pension_contribution: dec!(80000),
            ..TaxInput::default()
        };
        let assessment = assess(&with_pension, YEAR);
        assert_eq!(assessment.total_deductions, dec!(80000));
        assert_eq!(assessment.chargeable_income, dec!(520000));
    }

    #[test]
    fn chargeable_income_never_negative() {
        let small = assess(&input(dec!(150000)), YEAR);
        assert_eq!(small.chargeable_income, dec!(0));
        assert_eq!(small.annual_tax, dec!(0));
    }

    #[test]
    fn dependent_relief_reduces_tax() {
        let with_dependents = TaxInput {
            basic_salary: dec!(1000000),
            number_of_dependents: 4,
            ..TaxInput::default()
        };
        let assessment = assess(&with_dependents, YEAR);
        assert_eq!(assessment.dependent_relief, dec!(10000));
        assert_eq!(assessment.annual_tax, dec!(44000));
    }

    #[test]
    fn dependents_capped_at_ten() {
        let many = TaxInput {
            basic_salary: dec!(1000000),
            number_of_dependents: 25,
            ..TaxInput::default()
        };
        assert_eq!(assess(&many, YEAR).dependent_relief, dec!(25000));
    }

    #[test]
    fn disability_relief_reduces_tax() {
        let disabled = TaxInput {
            basic_salary: dec!(1000000),
            is_disabled: true,
            ..TaxInput::default()
        };
        let assessment = assess(&disabled, YEAR);
        assert_eq!(assessment.disability_relief, dec!(50000));
        assert_eq!(assessment.annual_tax, dec!(4000));
    }

    #[test]
    fn reliefs_never_push_tax_below_zero() {
        // Near-zero chargeable income with maximum reliefs
        let relieved = TaxInput {
            basic_salary: dec!(300000),
            number_of_dependents: 10,
            is_disabled: true,
            ..TaxInput::default()
        };
        let assessment = assess(&relieved, YEAR);
        assert_eq!(assessment.annual_tax, dec!(0));
        assert_eq!(assessment.net_income, assessment.gross_income);
    }

    #[test]
    fn net_income_never_exceeds_gross() {
        for basic in [dec!(0), dec!(250000), dec!(1000000), dec!(9000000)] {
            let assessment = assess(&input(basic), YEAR);
            assert!(assessment.net_income <= assessment.gross_income);
            assert!(assessment.annual_tax >= dec!(0));
        }
    }

    #[test]
    fn tax_monotonic_in_basic_salary() {
        let mut previous = Decimal::ZERO;
        for step in 0..40 {
            let basic = Decimal::from(step) * dec!(250000);
            let tax = assess(&input(basic), YEAR).annual_tax;
            assert!(tax >= previous, "tax decreased at basic={basic}");
            previous = tax;
        }
    }

    #[test]
    fn assessment_is_deterministic() {
        let filing = TaxInput {
            basic_salary: dec!(2400000),
            housing_allowance: dec!(600000),
            pension_contribution: dec!(192000),
            number_of_dependents: 2,
            ..TaxInput::default()
        };
        assert_eq!(assess(&filing, YEAR), assess(&filing, YEAR));
    }
}
