use diy_core::codes::CodeQuery;
use diy_store::schema::DEFAULT_JURISDICTION;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CodesMcp;
use crate::format;

/// Parameters for searching building codes.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchCodesParams {
    /// Natural language question, e.g. "outlet spacing in kitchen".
    pub query: String,
    /// State or city, e.g. "California". Defaults to "National".
    pub jurisdiction: Option<String>,
    /// One of electrical, plumbing, structural, mechanical, general.
    pub code_type: Option<String>,
}

/// Parameters for fetching a code section by reference.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetCodeSectionParams {
    /// Exact reference, e.g. "NEC 210.52(A)(1)" or "IRC R311.7.5".
    pub section_reference: String,
    pub jurisdiction: Option<String>,
}

/// Parameters for a compliance check.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CodeComplianceParams {
    /// Scenario to check, e.g. "outlets 18 feet apart in living room".
    pub scenario: String,
    pub jurisdiction: Option<String>,
}

fn jurisdiction_or_default(jurisdiction: Option<String>) -> String {
    jurisdiction
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_JURISDICTION.to_string())
}

#[tool_router(router = tool_router_codes, vis = "pub")]
impl CodesMcp {
    #[tool(
        description = "Search building codes by natural language query. Returns relevant code sections with citations."
    )]
    async fn search_building_codes(
        &self,
        Parameters(params): Parameters<SearchCodesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = CodeQuery::new(params.query)
            .with_jurisdiction(jurisdiction_or_default(params.jurisdiction))
            .with_code_type(params.code_type);
        let results = self.codes().search(&query);
        Ok(CallToolResult::success(vec![Content::text(
            format::code_results(&results),
        )]))
    }

    #[tool(
        description = "Retrieve a specific code section by exact reference (e.g. 'NEC 210.52', 'IRC R311.7')."
    )]
    async fn get_code_section(
        &self,
        Parameters(params): Parameters<GetCodeSectionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let jurisdiction = jurisdiction_or_default(params.jurisdiction);
        let text = self
            .codes()
            .get_section(&params.section_reference, &jurisdiction)
            .map_or_else(
                || {
                    debug!(
                        reference = %params.section_reference,
                        jurisdiction = %jurisdiction,
                        "code section not indexed"
                    );
                    format::code_not_found(&params.section_reference, &jurisdiction)
                },
                format::code_section,
            );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Check which building codes apply to a described scenario.")]
    async fn check_code_compliance(
        &self,
        Parameters(params): Parameters<CodeComplianceParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = CodeQuery::new(params.scenario.clone())
            .with_jurisdiction(jurisdiction_or_default(params.jurisdiction));
        let results = self.codes().search(&query);
        Ok(CallToolResult::success(vec![Content::text(
            format::compliance(&params.scenario, &results),
        )]))
    }

    #[tool(description = "List all code categories with section counts and sample questions.")]
    async fn list_code_categories(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(
            self.codes().categories(),
        )?]))
    }
}

#[cfg(test)]
mod tests {
    use diy_core::codes::CodeDatabase;
    use rmcp::model::RawContent;

    use super::*;

    fn server() -> CodesMcp {
        let database = CodeDatabase::from_json(
            r#"[
                {
                    "code_ref": "NEC 210.52(C)(1)",
                    "title": "Kitchen Countertop Receptacle Spacing",
                    "category": "electrical",
                    "jurisdiction": "National",
                    "summary": "No point along the countertop may be more than 24 inches from an outlet.",
                    "common_questions": ["How many outlets on a kitchen counter?"],
                    "source": "NFPA 70"
                },
                {
                    "code_ref": "IRC R311.7.5",
                    "title": "Stair Riser and Tread Dimensions",
                    "category": "structural",
                    "jurisdiction": "National",
                    "summary": "Risers may not exceed 7-3/4 inches.",
                    "source": "IRC 2021"
                }
            ]"#,
        )
        .expect("valid corpus");
        CodesMcp::new(database)
    }

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|content| match &content.raw {
                RawContent::Text(text) => Some(text.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn search_renders_ranked_sections() {
        let result = server()
            .search_building_codes(Parameters(SearchCodesParams {
                query: "kitchen outlet".to_string(),
                jurisdiction: None,
                code_type: Some("electrical".to_string()),
            }))
            .await
            .expect("search succeeds");

        assert!(text_of(&result).contains("**1. Kitchen Countertop Receptacle Spacing**"));
    }

    #[tokio::test]
    async fn missing_section_is_guidance_not_error() {
        let result = server()
            .get_code_section(Parameters(GetCodeSectionParams {
                section_reference: "NEC 999.1".to_string(),
                jurisdiction: Some("Texas".to_string()),
            }))
            .await
            .expect("not an error");

        assert!(text_of(&result).starts_with("Code section 'NEC 999.1' not found in database for Texas."));
    }

    #[tokio::test]
    async fn compliance_lists_applicable_codes() {
        let result = server()
            .check_code_compliance(Parameters(CodeComplianceParams {
                scenario: "stair risers 8 inches".to_string(),
                jurisdiction: None,
            }))
            .await
            .expect("check succeeds");
        let text = text_of(&result);

        assert!(text.starts_with("**Compliance Check for:** stair risers 8 inches"));
        assert!(text.contains("- Stair Riser and Tread Dimensions (IRC R311.7.5)"));
    }

    #[test]
    fn blank_jurisdiction_falls_back_to_national() {
        assert_eq!(jurisdiction_or_default(None), "National");
        assert_eq!(jurisdiction_or_default(Some("  ".to_string())), "National");
        assert_eq!(
            jurisdiction_or_default(Some("California".to_string())),
            "California"
        );
    }
}
