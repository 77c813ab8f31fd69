//! Gateway backed by an OpenAI-compatible chat-completions endpoint.

use super::{CallProposal, CompletionGateway, MultiCallPolicy};
use crate::catalog::ToolCatalog;
use crate::config::GatewaySettings;
use crate::error::{Result, RouterError, SwitchyardError};
use crate::openai::create_client;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, ChatCompletionTool,
    ChatCompletionToolChoiceOption, ChatCompletionToolType, CreateChatCompletionRequestArgs,
    FunctionObject,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Everything the gateway needs, resolved once at startup.
///
/// Not `Debug`: it carries the bearer token.
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub timeout: Duration,
    pub on_multiple_calls: MultiCallPolicy,
}

impl GatewayConfig {
    /// Resolve settings, reading the API key from its environment variable.
    pub fn from_settings(settings: &GatewaySettings) -> Result<Self> {
        Ok(Self {
            api_base: settings.api_base.clone(),
            api_key: settings.api_key()?,
            model: settings.model.clone(),
            system_prompt: settings.system_prompt.clone(),
            timeout: settings.timeout(),
            on_multiple_calls: settings.on_multiple_calls,
        })
    }
}

/// Gateway that asks a chat model to call exactly one catalog function.
pub struct OpenAIGateway {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    config: GatewayConfig,
}

impl OpenAIGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(SwitchyardError::Config("Gateway API key is empty".to_string()));
        }
        let client = create_client(&config.api_base, &config.api_key, config.timeout)?;
        Ok(Self { client, config })
    }

    /// Use a different model than the configured one.
    pub fn with_model(mut self, model: &str) -> Self {
        self.config.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn messages(&self, query: &str) -> std::result::Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.config.system_prompt.clone())
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(query.to_string())
                .build()?
                .into(),
        ])
    }

    fn map_error(&self, err: OpenAIError) -> RouterError {
        match err {
            OpenAIError::Reqwest(e) if e.is_timeout() => RouterError::GatewayTimeout(self.config.timeout),
            other => RouterError::GatewayFailure(other.to_string()),
        }
    }
}

#[async_trait]
impl CompletionGateway for OpenAIGateway {
    #[instrument(skip(self, query, catalog), fields(model = %self.config.model, tools = catalog.len()))]
    async fn propose(&self, query: &str, catalog: &ToolCatalog) -> std::result::Result<CallProposal, RouterError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(self.messages(query).map_err(|e| self.map_error(e))?)
            .tools(chat_tools(catalog))
            .tool_choice(ChatCompletionToolChoiceOption::Required)
            .build()
            .map_err(|e| self.map_error(e))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| self.map_error(e))?;

        if response.choices.len() > 1 {
            debug!("Ignoring {} extra choices", response.choices.len() - 1);
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RouterError::GatewayFailure("Reply contained no choices".to_string()))?;

        let tool_calls = choice.message.tool_calls.unwrap_or_default();
        proposal_from_tool_calls(tool_calls, self.config.on_multiple_calls)
    }
}

/// Present the catalog as function tools.
pub(crate) fn chat_tools(catalog: &ToolCatalog) -> Vec<ChatCompletionTool> {
    catalog
        .all()
        .iter()
        .map(|spec| ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: spec.name.clone(),
                description: Some(spec.description.clone()),
                parameters: Some(spec.parameters_schema()),
                strict: None,
            },
        })
        .collect()
}

/// Pick the proposal out of a reply's tool calls.
pub(crate) fn proposal_from_tool_calls(
    tool_calls: Vec<ChatCompletionMessageToolCall>,
    policy: MultiCallPolicy,
) -> std::result::Result<CallProposal, RouterError> {
    let count = tool_calls.len();
    let first = tool_calls
        .into_iter()
        .next()
        .ok_or_else(|| RouterError::GatewayFailure("Reply contained no tool call".to_string()))?;

    if count > 1 {
        match policy {
            MultiCallPolicy::First => {
                warn!(
                    kept = %first.function.name,
                    discarded = count - 1,
                    "Reply contained multiple tool calls, keeping the first"
                );
            }
            MultiCallPolicy::Reject => {
                return Err(RouterError::GatewayFailure(format!(
                    "Reply contained {} tool calls, expected exactly one",
                    count
                )));
            }
        }
    }

    let arguments = parse_arguments(&first.function.arguments)?;
    Ok(CallProposal {
        name: first.function.name,
        arguments,
    })
}

/// Decode the JSON-encoded argument string. A blank string means no arguments.
pub(crate) fn parse_arguments(raw: &str) -> std::result::Result<Map<String, Value>, RouterError> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RouterError::GatewayFailure(format!(
            "Tool arguments must be a JSON object, got {}",
            other
        ))),
        Err(e) => Err(RouterError::GatewayFailure(format!("Invalid tool arguments: {}", e))),
    }
}
