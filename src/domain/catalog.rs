use crate::domain::model::{OfferStrength, ProspectTier};

pub static PROSPECT_TIERS: [ProspectTier; 3] = [
    ProspectTier {
        prospect_count: 2000,
        monthly_cost: 2000,
        label: "£2,000/month",
        description: "2,000 prospects",
    },
    ProspectTier {
        prospect_count: 3500,
        monthly_cost: 3000,
        label: "£3,000/month",
        description: "3,500 prospects",
    },
    ProspectTier {
        prospect_count: 7000,
        monthly_cost: 4000,
        label: "£4,000/month",
        description: "7,000 prospects",
    },
];

pub static OFFER_STRENGTHS: [OfferStrength; 4] = [
    OfferStrength {
        label: "Good",
        prospects_per_lead: 500,
    },
    OfferStrength {
        label: "Great",
        prospects_per_lead: 350,
    },
    OfferStrength {
        label: "Exceptional",
        prospects_per_lead: 200,
    },
    OfferStrength {
        label: "Outstanding",
        prospects_per_lead: 100,
    },
];

pub fn prospect_tier(index: usize) -> Option<&'static ProspectTier> {
    PROSPECT_TIERS.get(index)
}

pub fn offer_strength(index: usize) -> Option<&'static OfferStrength> {
    OFFER_STRENGTHS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(PROSPECT_TIERS.len(), 3);
        assert_eq!(OFFER_STRENGTHS.len(), 4);
        assert!(prospect_tier(3).is_none());
        assert!(offer_strength(4).is_none());
    }

    #[test]
    fn test_conversion_rates_in_unit_interval() {
        for strength in &OFFER_STRENGTHS {
            let rate = strength.conversion_rate();
            assert!(rate > 0.0 && rate <= 1.0, "{} out of range", strength.label);
        }
    }

    #[test]
    fn test_cost_per_prospect() {
        assert!((PROSPECT_TIERS[0].cost_per_prospect() - 1.0).abs() < 1e-9);
        assert!((PROSPECT_TIERS[2].cost_per_prospect() - 4000.0 / 7000.0).abs() < 1e-9);
    }
}
