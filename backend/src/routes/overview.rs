use serde::{Deserialize, Serialize};

// =========================================================
// Overview types + route
// =========================================================

/// One simulator section and the math it demonstrates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptModule {
    pub concept: String,
    pub application: String,
    /// Route constant serving the section's data
    pub route: String,
}

/// Landing page description of the tutoring business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewData {
    pub name: String,
    pub tagline: String,
    pub mission: String,
    pub target_market: String,
    pub subjects: Vec<String>,
    pub format: String,
    pub concepts: Vec<ConceptModule>,
}

/// Route function name constant for overview data
pub const GET_OVERVIEW_DATA: &str = "get_overview_data";

fn concept(concept: &str, application: &str, route: &str) -> ConceptModule {
    ConceptModule {
        concept: concept.to_string(),
        application: application.to_string(),
        route: route.to_string(),
    }
}

/// Get the static business overview
pub fn get_overview_data() -> OverviewData {
    OverviewData {
        name: "UmojaMath Tutoring Service".to_string(),
        tagline: "An interactive simulation of an African-centered math tutoring service \
                  using advanced precalculus concepts."
            .to_string(),
        mission: "Providing African-centered online math tutoring with cultural relevance \
                  and mathematical rigor."
            .to_string(),
        target_market: "African American high school students (grades 9-12)".to_string(),
        subjects: vec![
            "Algebra II".to_string(),
            "Trigonometry".to_string(),
            "Precalculus".to_string(),
        ],
        format: "Zoom sessions (1-on-1 or small group)".to_string(),
        concepts: vec![
            concept(
                "Piecewise Functions",
                "Pricing structure optimization",
                super::pricing::GET_PRICING_DATA,
            ),
            concept(
                "Exponential Functions",
                "Advertising reach modeling",
                super::advertising::GET_ADVERTISING_DATA,
            ),
            concept(
                "Linear Programming",
                "Tutor scheduling",
                super::scheduling::GET_SCHEDULE_DATA,
            ),
            concept(
                "Quadratic Functions",
                "Profit maximization",
                super::profit::GET_PROFIT_DATA,
            ),
            concept(
                "Trigonometric Functions",
                "Seasonal trend analysis",
                super::seasonality::GET_SEASONALITY_DATA,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_lists_subjects_and_concepts() {
        let overview = get_overview_data();
        assert_eq!(overview.subjects.len(), 3);
        assert_eq!(overview.concepts.len(), 5);
        assert_eq!(overview.concepts[0].route, "get_pricing_data");
        assert!(overview.tagline.contains("African-centered math tutoring service using"));
    }
}
