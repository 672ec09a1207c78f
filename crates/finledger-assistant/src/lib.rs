//! Assistant gateway
//!
//! Stateless mediation between the UI and an external chat completion
//! provider. Per request: validate the question, short-circuit
//! greetings, forward everything else to the provider with a snapshot
//! of the financial totals embedded in the prompt, and degrade to the
//! rule-based fallback when the external call fails. A single attempt,
//! no retries, no conversation history.

pub mod deepseek;
pub mod error;
pub mod fallback;
pub mod provider;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use deepseek::DeepSeekProvider;
pub use error::{AssistantError, AssistantResult};
pub use fallback::fallback_response;
pub use provider::{ChatProvider, ChatReply};

/// Fixed signature appended to every answer
pub const SIGNATURE: &str = "\n\n---\n*FinAssistant - Assistente Financeiro Pessoal*";

/// Fixed introductory message for greetings
pub const GREETING_RESPONSE: &str = "**Olá! Eu sou o seu assistente financeiro pessoal!** 💰\n\n\
    Como posso ajudar você hoje? Posso auxiliar com:\n\n\
    • 📊 Controle de gastos\n\
    • 💰 Economia e investimentos\n\
    • 🎯 Metas financeiras\n\
    • 📈 Análise do seu orçamento\n\n\
    Em que posso ser útil?";

/// Persona instruction sent as the system message
const SYSTEM_PROMPT: &str = "Você é o FinAssistant, assistente financeiro pessoal. \
    Seja direto, prático e sempre assine como \"FinAssistant - Assistente Financeiro Pessoal\".";

/// Snapshot of the computed ledger totals, as sent by the UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    pub balance: f64,
    pub income: f64,
    pub expense: f64,
    pub transaction_count: usize,
}

/// Gateway answer, always success-shaped at the HTTP level; the
/// `success` flag distinguishes real provider answers from fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    pub success: bool,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "isGreeting", default, skip_serializing_if = "is_false")]
    pub is_greeting: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// The assistant gateway. Holds the provider (absent when no API key
/// is configured) and no other state; every request is independent.
pub struct Gateway {
    provider: Option<Arc<dyn ChatProvider>>,
}

impl Gateway {
    pub fn new(provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self { provider }
    }

    /// Answer one question.
    ///
    /// Errors only for the two client-visible hard conditions (empty
    /// message, missing credential); provider failures come back as a
    /// fallback reply with `success: false`. A whitespace-only message
    /// is not an error: it counts as a greeting and gets the fixed
    /// introduction.
    pub async fn handle(
        &self,
        message: &str,
        snapshot: Option<&FinancialSnapshot>,
    ) -> AssistantResult<AssistantReply> {
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        if is_greeting(message) {
            return Ok(AssistantReply {
                success: true,
                response: GREETING_RESPONSE.to_string(),
                usage: None,
                error: None,
                is_greeting: true,
            });
        }

        let provider = match &self.provider {
            Some(provider) => provider,
            None => return Err(AssistantError::MissingApiKey),
        };

        let prompt = build_prompt(message, snapshot);

        match provider.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => Ok(AssistantReply {
                success: true,
                response: format!("{}{}", reply.content, SIGNATURE),
                usage: reply.usage,
                error: None,
                is_greeting: false,
            }),
            Err(e) => {
                log::warn!("Provider {} failed, using fallback: {}", provider.name(), e);
                Ok(AssistantReply {
                    success: false,
                    response: format!("{}{}", fallback_response(message), SIGNATURE),
                    usage: None,
                    error: Some(format!("Usando modo fallback - {}", e)),
                    is_greeting: false,
                })
            }
        }
    }
}

/// Greeting detection: case-insensitive containment of a greeting
/// token, or an all-whitespace message.
pub fn is_greeting(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.trim().is_empty()
        || lower.contains("oi")
        || lower.contains("olá")
        || lower.contains("hello")
        || lower.contains("hi")
}

/// Structured prompt embedding the totals snapshot and the verbatim
/// question, with a bounded response-length instruction.
fn build_prompt(message: &str, snapshot: Option<&FinancialSnapshot>) -> String {
    let (balance, income, expense, count) = match snapshot {
        Some(s) => (
            format!("{:.2}", s.balance),
            format!("{:.2}", s.income),
            format!("{:.2}", s.expense),
            s.transaction_count.to_string(),
        ),
        None => (
            "N/A".to_string(),
            "N/A".to_string(),
            "N/A".to_string(),
            "0".to_string(),
        ),
    };

    format!(
        "Você é o FinAssistant, um assistente financeiro pessoal especializado.\n\
         Seja prático, direto e útil, sempre com tom amigável e profissional.\n\n\
         Dados do usuário (se disponíveis):\n\
         - Saldo: R$ {}\n\
         - Receitas: R$ {}\n\
         - Despesas: R$ {}\n\
         - Transações: {}\n\n\
         Pergunta do usuário: \"{}\"\n\n\
         Forneça uma resposta:\n\
         1. Prática e acionável\n\
         2. Com números específicos quando possível\n\
         3. Focada em melhorar a saúde financeira\n\
         4. Em português do Brasil\n\
         5. Máximo 200 palavras\n\
         6. Assine como \"FinAssistant - Assistente Financeiro Pessoal\"",
        balance, income, expense, count, message
    )
}
