//! Estimate request construction and response validation.
//!
//! Turns a snapshot of the form into a natural-language request plus a strict
//! output schema, hands both to the Gemini client, and validates the reply
//! into an `Estimate` or a typed failure. Exactly one service call per
//! submission; retry policy belongs to the caller.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::EstimateError;
use crate::form::{field_relevant, Field, FormState};
use crate::gemini::GeminiClient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalRange {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub category: String,
    pub cost: f64,
    pub description: String,
}

/// The validated result of one estimate round-trip. Values and breakdown
/// order are kept exactly as the service returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    #[serde(rename = "totalRange")]
    pub total_range: TotalRange,
    pub breakdown: Vec<BreakdownItem>,
    #[serde(default)]
    pub summary: String,
}

/// Static pricing-heuristics preamble sent as the system instruction with
/// every request. Configuration, not logic: nothing here depends on input.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert remodeling cost estimator specializing in the Northern Virginia (NOVA) market. Your task is to provide a detailed and realistic cost breakdown for a home remodeling project based on user inputs. The location provided is a Northern Virginia zip code or city. Factor in that labor and material costs are higher in this region.\n\
\n\
For kitchens, closets, and other custom projects, the 'Cabinet Line' is a specific product from our store; use this to infer the quality, style, and cost tier (e.g., Fabuwood Allure is a premium line, while CNC Luxor is more budget-friendly).\n\
\n\
For bathrooms, the 'Vanity Line' is a specific brand of vanity we carry; use this to infer quality and cost for bathroom vanities.\n\
\n\
For project types like Laundry Rooms, Home Offices, Entertainment Centers, and Bars, the cost is heavily dependent on the amount of custom cabinetry. A Wet Bar will also include plumbing costs for a sink. A Home Office may include premium countertops for desks. An Entertainment Center is almost entirely custom cabinetry. A Closet project's cost is driven by the complexity of the closet system selected. Use the Cabinet Line to estimate the quality and cost of materials.\n\
\n\
The user can also select cabinet and vanity hardware. The cost should be based on the number of cabinets/vanities and the selected tier: 'Standard Finish' is a basic, included cost. 'Mid-Range Finish' adds a moderate amount. 'Premium/Designer Hardware' can be a significant cost, as some knobs and pulls are expensive. If 'No New Hardware' is selected, do not include this cost.\n\
\n\
For countertops, 'Quartzite' and 'Soapstone' are premium materials, often more expensive than Marble and high-end Quartz. 'Granite' and 'Quartz' have a wide price range but are generally mid-to-high tier. If 'No Change' is selected for countertops, do not include countertop costs in the breakdown.\n\
\n\
The user may also select tile work. The 'Tile Work Scope' specifies the areas to be tiled (e.g., floor, backsplash, shower walls). The cost should be estimated based on the area and complexity. Shower walls require waterproofing and are more expensive per sq ft than floors. A kitchen backsplash is typically a smaller area (approx 30 sq ft). The 'Primary Tile Material' influences cost: 'Natural Stone' is premium, 'Glass / Mosaic' is high-end/decorative, and 'Ceramic / Porcelain' is standard. If the scope is 'No Tile Work', do not include any tile costs in the breakdown.\n\
\n\
For plumbing, the 'Sink Type' specifies the material and style. 'Fireclay' kitchen sinks are premium and heavy, requiring more labor. 'Composite' is mid-to-high range. 'Stainless Steel' is standard. For bathrooms, 'Vessel' sinks sit on top of the counter and may have different plumbing and faucet requirements than standard 'Undermount' sinks. If 'No New Sink' is selected, do not include sink costs. A 'New Faucet' selection implies a standard faucet and installation cost.\n\
\n\
For bathroom fixtures, consider the selected Toilet and Bathtub/Shower type. 'Smart Toilets', 'Freestanding/Soaking' tubs, and especially 'Custom Tile Showers' are premium, high-cost items that significantly increase both material and labor costs. A custom tile shower involves extensive waterproofing, plumbing work, and skilled tile installation, making it one of the most expensive single items in a bathroom remodel.\n\
\n\
ALWAYS respond with a valid JSON object matching the provided schema. Do not include any introductory text, markdown formatting like ```json, or explanations outside of the JSON structure. If the number of cabinets/vanities is not specified, estimate it based on the square footage and project type (e.g., a 150 sq ft kitchen has around 12-15 cabinets, a master bathroom might have 1-2 vanities). A 'complete gut renovation' or 'layout changes' will significantly increase labor costs compared to 'cosmetic updates only'. An older home (e.g., > 30 years) may have higher costs due to potential plumbing/electrical updates needed to meet current code.";

/// Machine-readable output contract: exactly three top-level fields, all
/// required. Declared to the service alongside the prompt.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "totalRange": {
                "type": "OBJECT",
                "properties": {
                    "low": {
                        "type": "NUMBER",
                        "description": "The low end of the total estimated cost range as a whole number."
                    },
                    "high": {
                        "type": "NUMBER",
                        "description": "The high end of the total estimated cost range as a whole number."
                    }
                },
                "required": ["low", "high"]
            },
            "breakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": {
                            "type": "STRING",
                            "description": "The cost category (e.g., Cabinetry, Countertops, Tile Work, Labor, Materials, Additional Features)."
                        },
                        "cost": {
                            "type": "NUMBER",
                            "description": "The estimated cost for this category as a whole number."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "A brief description of what this category includes."
                        }
                    },
                    "required": ["category", "cost", "description"]
                }
            },
            "summary": {
                "type": "STRING",
                "description": "A brief, one-sentence summary of the project inputs."
            }
        },
        "required": ["totalRange", "breakdown", "summary"]
    })
}

/// Assemble the project-attribute block. Deterministic: the same form state
/// always yields the same text. Inclusion of each optional block follows
/// `field_relevant` plus the field's sentinel check, the same rules the form
/// itself uses.
pub fn build_project_details(form: &FormState) -> String {
    let mut details = String::new();

    details.push_str(&format!("- Project Type: {}\n", form.project_type.label()));
    details.push_str(&format!("- Room Size: {} square feet\n", form.sqft));
    details.push_str(&format!("- Location (City or Zip Code): {}\n", form.location));

    if field_relevant(form.project_type, Field::BathroomType) {
        details.push_str(&format!("- Bathroom Type: {}\n", form.bathroom_type.label()));
        details.push_str(&format!("- Vanity Line: {}\n", form.vanity_line.label()));
        let vanity_count = if form.num_cabinets.is_empty() {
            // An unspecified count must become an explicit instruction, never
            // a blank the service could read as zero.
            "Please estimate based on room size and bathroom type".to_string()
        } else {
            form.num_cabinets.clone()
        };
        details.push_str(&format!("- Number of Vanities: {}\n", vanity_count));
        let scope = if form.project_scope.is_empty() {
            "Not specified".to_string()
        } else {
            form.project_scope
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        details.push_str(&format!("- Project Scope: {}\n", scope));
        let home_age = if form.home_age.is_empty() {
            "Not specified".to_string()
        } else {
            format!("{} years old", form.home_age)
        };
        details.push_str(&format!("- Home Age: {}\n", home_age));
    } else if field_relevant(form.project_type, Field::CabinetLine) {
        details.push_str(&format!("- Cabinet Line: {}\n", form.cabinet_line.label()));
        let cabinet_count = if form.num_cabinets.is_empty() {
            "Please estimate based on room size and project type".to_string()
        } else {
            form.num_cabinets.clone()
        };
        details.push_str(&format!("- Number of Cabinets / Units: {}\n", cabinet_count));
    }

    if !form.hardware_finish.is_sentinel() {
        details.push_str(&format!(
            "- Cabinet & Vanity Hardware: {}\n",
            form.hardware_finish.label()
        ));
    }

    if field_relevant(form.project_type, Field::CountertopMaterial)
        && !form.countertop_material.is_sentinel()
    {
        details.push_str(&format!(
            "- New Countertop Material: {}\n",
            form.countertop_material.label()
        ));
    }

    if field_relevant(form.project_type, Field::TileAreas) && form.has_tile_work() {
        let areas = form
            .tile_areas
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join(", ");
        details.push_str(&format!("- Tile Work Scope: {}\n", areas));
        details.push_str(&format!("- Primary Tile Material: {}\n", form.tile_material.label()));
    }

    if field_relevant(form.project_type, Field::SinkType) && !form.sink_type.is_sentinel() {
        details.push_str(&format!("- New Sink Type: {}\n", form.sink_type.label()));
    }

    if field_relevant(form.project_type, Field::ToiletType) && !form.toilet_type.is_sentinel() {
        details.push_str(&format!("- New Toilet: {}\n", form.toilet_type.label()));
    }
    if field_relevant(form.project_type, Field::ShowerType) && !form.shower_type.is_sentinel() {
        details.push_str(&format!("- New Bathtub/Shower: {}\n", form.shower_type.label()));
    }

    let features = if form.additional_features.is_empty() {
        "None".to_string()
    } else {
        form.additional_features
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    details.push_str(&format!("- Additional Features: {}\n", features));

    details
}

pub fn build_user_prompt(form: &FormState) -> String {
    format!(
        "Calculate the remodeling cost for the following project in Northern Virginia:\n\
         {}\n\
         Provide a cost breakdown including materials, labor, cabinetry, countertops, \
         tile work (if selected), plumbing (if selected), and each selected extra feature.",
        build_project_details(form)
    )
}

/// Validate a raw service reply against the declared contract.
///
/// Malformed JSON fails as `ResponseParse`; a reply missing the required
/// top-level fields or whose fields cannot coerce to the declared types
/// fails as `ResponseShape`. Anything that passes is accepted exactly as
/// returned: no clamping, no re-sorting, no default-filling beyond what the
/// schema declares optional.
pub fn parse_estimate(raw: &str) -> Result<Estimate, EstimateError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|e| EstimateError::ResponseParse(e.to_string()))?;

    if value.get("totalRange").is_none() || value.get("breakdown").is_none() {
        return Err(EstimateError::ResponseShape(
            "reply is missing totalRange or breakdown".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| EstimateError::ResponseShape(e.to_string()))
}

/// One estimate round-trip: build the request, call the service once, and
/// validate the reply. No retries here.
pub async fn request_estimate(
    client: &GeminiClient,
    form: &FormState,
) -> Result<Estimate, EstimateError> {
    let prompt = build_user_prompt(form);
    tracing::debug!(
        project = form.project_type.label(),
        prompt_len = prompt.len(),
        "requesting estimate"
    );
    let raw = client
        .generate(SYSTEM_INSTRUCTION, &prompt, response_schema())
        .await?;
    parse_estimate(&raw)
}
