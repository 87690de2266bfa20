use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use rmcp::{ServiceExt, transport::stdio};

use crate::config::Config;
use crate::errors::{LighthouseResult, LighthouseServerError, McpResult};
use crate::models::{AnalysisRequest, AuditPromptArgs, Category, DEFAULT_TIMEOUT_MS, Strategy};
use crate::services::{
    PageSpeedClient, Validate,
    report::{KEY_METRICS, failure_message, format_report},
};

/// Lighthouse MCP Server backed by PageSpeed Insights
#[derive(Clone)]
pub struct LighthouseServer {
    tool_router: ToolRouter<LighthouseServer>,
    prompt_router: PromptRouter<LighthouseServer>,
    client: PageSpeedClient,
}

impl LighthouseServer {
    pub fn new(client: PageSpeedClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
            client,
        }
    }

    /// Run one analysis and render it; transport failures become a fixed sentence
    async fn analyze(&self, request: &AnalysisRequest) -> String {
        match self.client.dispatch(request).await {
            Some(response) => format_report(&response, request),
            None => failure_message(request.url()),
        }
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    fn resource_content(&self, uri: &str) -> LighthouseResult<String> {
        match uri {
            "lighthouse://help" => Ok(self.generate_help_content()),
            "lighthouse://categories" => Ok(self.generate_categories_content()),
            _ => Err(LighthouseServerError::ResourceNotFound {
                uri: uri.to_string(),
            }),
        }
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"Lighthouse MCP Server Help

TOOLS:
- get-lighthouse-report: Run a Lighthouse analysis through PageSpeed Insights
  - url: Absolute URL of the page (required)
  - category: {} (default: performance)
  - strategy: {} (default: mobile)
  - timeout: Timeout in milliseconds (default: {})
  - Example: {{"url": "https://example.com", "category": "performance", "strategy": "desktop"}}

PROMPTS:
- lighthouse-audit: Pull a Lighthouse report into the conversation

RESOURCES:
- lighthouse://help: This help documentation
- lighthouse://categories: Categories and strategies accepted by the tool

REPORT LAYOUT:
- Header with category and URL, strategy and score (0-100)
- Key metrics: {}
- Opportunities: audits with measurable potential savings

A single attempt is made per call. When PageSpeed cannot be reached in time
the report reads "Failed to retrieve Lighthouse data for <url>"."#,
            Self::joined(Category::ALL.iter()),
            Self::joined(Strategy::ALL.iter()),
            DEFAULT_TIMEOUT_MS,
            KEY_METRICS.join(", ")
        )
    }

    fn generate_categories_content(&self) -> String {
        let mut content = String::from("Lighthouse Categories\n\n");
        for category in Category::ALL {
            content.push_str(&format!("- {}\n", category));
        }
        content.push_str("\nStrategies\n\n");
        for strategy in Strategy::ALL {
            content.push_str(&format!("- {}\n", strategy));
        }
        content
    }

    fn joined<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
        items
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[tool_router]
impl LighthouseServer {
    #[tool(
        name = "get-lighthouse-report",
        description = "Get a Lighthouse report for a webpage from Google PageSpeed Insights. Returns the category score, key performance metrics and opportunities for improvement."
    )]
    async fn get_lighthouse_report(
        &self,
        Parameters(req): Parameters<AnalysisRequest>,
    ) -> McpResult<CallToolResult> {
        req.validate()?;
        let report = self.analyze(&req).await;

        Ok(CallToolResult::success(vec![Content::text(report)]))
    }
}

#[prompt_router]
impl LighthouseServer {
    /// Run a Lighthouse audit and add the report to the conversation
    #[prompt(name = "lighthouse-audit")]
    async fn lighthouse_audit(
        &self,
        Parameters(args): Parameters<AuditPromptArgs>,
        _ctx: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<GetPromptResult> {
        args.validate()?;
        let request = args.into_request();
        let report = self.analyze(&request).await;

        Ok(GetPromptResult {
            description: Some(format!(
                "Lighthouse {} report for {}",
                request.category(),
                request.url()
            )),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(report),
            }],
        })
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for LighthouseServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Lighthouse MCP Server for web performance analysis. Tool: get-lighthouse-report (PageSpeed Insights score, key metrics and improvement opportunities for a URL). Prompt: lighthouse-audit. Categories: performance, accessibility, best-practices, seo, pwa. Strategies: mobile, desktop.".to_string()),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("lighthouse://help", "help-documentation"),
                self.create_resource_text("lighthouse://categories", "category-list"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        let content = self.resource_content(&uri)?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(content, uri)],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourceTemplatesResult> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!("Lighthouse MCP Server initialized successfully");
        Ok(self.get_info())
    }
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = PageSpeedClient::from_config(&config)?;
    let server = LighthouseServer::new(client);

    let server = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    server.waiting().await?;

    Ok(())
}
