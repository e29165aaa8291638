//! Built-in example patient scenarios offered on the form.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// URL-safe identifier (`?scenario=<id>`).
    pub id: &'static str,
    pub title: &'static str,
    pub notes: &'static str,
}

impl Scenario {
    /// The free-form entry with no preset notes.
    pub fn is_custom(&self) -> bool {
        self.notes.is_empty()
    }
}

pub const CUSTOM_ID: &str = "custom";

pub const SCENARIOS: [Scenario; 6] = [
    Scenario {
        id: "copd-exacerbation",
        title: "COPD Exacerbation",
        notes: "\
Patient: 68M with COPD
Chief Complaint: Shortness of breath x3 days
Vitals: O2 sat 88% on room air, HR 98, BP 145/82, Temp 101.2°F
PMH: COPD (FEV1 45%), hypertension, hyperlipidemia
Treatment: Prednisone 40mg daily, Azithromycin 500mg, nebulizers q4h
Response: O2 sat improved to 94% on RA by day 3
Labs: WBC 12.5→8.9, Procalcitonin 0.3
Discharge: Stable, continue meds, f/u with PCP in 1 week, Pulmonology in 4 weeks",
    },
    Scenario {
        id: "type-2-diabetes",
        title: "Type 2 Diabetes - New Diagnosis",
        notes: "\
Patient: 52F newly diagnosed Type 2 Diabetes
Chief Complaint: Polyuria, polydipsia, fatigue x 2 months, weight loss 15 lbs
Vitals: BP 138/85, HR 82, BMI 31
Labs: HbA1c 9.2%, Fasting glucose 245 mg/dL, eGFR 78
Treatment: Diabetes education, Metformin 500mg BID started
Diet counseling provided, exercise plan discussed
Response: Patient engaged, glucose logs started, improving control
Discharge: Start Metformin, glucose monitoring, dietitian referral
Follow-up: PCP in 2 weeks, Endocrinology in 6 weeks, ophthalmology for eye exam",
    },
    Scenario {
        id: "post-op-appendectomy",
        title: "Post-Operative Appendectomy",
        notes: "\
Patient: 34M s/p laparoscopic appendectomy
Indication: Acute appendicitis without perforation
Procedure: Uncomplicated laparoscopic appendectomy on Day 0
Post-op course: Tolerating regular diet, ambulating well, pain controlled
Vitals stable, afebrile, incisions clean/dry/intact
Medications: Acetaminophen 650mg q6h PRN, Ibuprofen 400mg q6h PRN
Discharge: POD 1, doing well, no complications
Instructions: Activity as tolerated, no heavy lifting x 2 weeks, return to work in 1 week
Follow-up: Surgeon in 2 weeks for wound check",
    },
    Scenario {
        id: "heart-failure-exacerbation",
        title: "Heart Failure Exacerbation",
        notes: "\
Patient: 75F with CHF exacerbation
Chief Complaint: Progressive dyspnea, orthopnea, lower extremity edema x 5 days
PMH: CHF (EF 30%), CAD s/p CABG, A-fib on warfarin
Vitals: BP 160/95, HR 110 (irregular), RR 24, O2 sat 90% on 2L NC
Weight: +12 lbs from baseline
Treatment: IV Furosemide 40mg BID, increased Carvedilol, ACE-I optimization
Response: Diuresed 4L, improved dyspnea, O2 sat 95% on RA, weight down 10 lbs
Discharge: Euvolemic, stable on oral diuretics
Daily weights, strict 2g sodium diet, fluid restriction 1.5L/day
Follow-up: Cardiology in 1 week, PCP in 2 weeks",
    },
    Scenario {
        id: "pediatric-asthma",
        title: "Pediatric - Asthma Exacerbation",
        notes: "\
Patient: 8M with asthma exacerbation
Chief Complaint: Wheezing, cough, difficulty breathing x 2 days
PMH: Moderate persistent asthma, seasonal allergies
Vitals: O2 sat 92% on RA, HR 115, RR 32, Temp 99.1°F
Exam: Diffuse expiratory wheezes bilaterally, using accessory muscles
Treatment: Albuterol/Ipratropium nebs q4h, Prednisone 2mg/kg/day
Response: Improved breath sounds, O2 sat 98%, decreased work of breathing
Discharge: Stable on oral steroids and MDI
Asthma action plan reviewed with parents, spacer technique demonstrated
Follow-up: Pediatrician in 3 days, consider allergy testing",
    },
    Scenario {
        id: CUSTOM_ID,
        title: "Custom Case",
        notes: "",
    },
];

pub fn all() -> &'static [Scenario] {
    &SCENARIOS
}

pub fn find(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}

/// Preselected scenario when none is requested.
pub fn default_scenario() -> &'static Scenario {
    &SCENARIOS[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn six_scenarios_custom_last() {
        assert_eq!(all().len(), 6);
        let last = all().last().unwrap();
        assert!(last.is_custom());
        assert_eq!(last.title, "Custom Case");
        assert_eq!(all().iter().filter(|s| s.is_custom()).count(), 1);
    }

    #[test]
    fn ids_are_unique_and_url_safe() {
        let ids: HashSet<_> = all().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), all().len());
        for s in all() {
            assert!(s.id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find("pediatric-asthma").unwrap().title, "Pediatric - Asthma Exacerbation");
        assert!(find("nope").is_none());
    }

    #[test]
    fn default_is_copd() {
        assert_eq!(default_scenario().title, "COPD Exacerbation");
        assert!(default_scenario().notes.starts_with("Patient: 68M with COPD"));
    }
}
