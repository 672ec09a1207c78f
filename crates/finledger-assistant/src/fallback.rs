//! Rule-based fallback responder
//!
//! Used whenever the external provider call fails. Pattern-matches the
//! question against a small fixed set of financial topics and returns a
//! canned multi-line tip, or a generic capability description when no
//! topic matches. Responses stay in Portuguese, matching the product's
//! audience.

/// Produce a canned answer for a question the provider could not serve
pub fn fallback_response(message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("economizar") || lower.contains("gastar menos") {
        return "💡 **Dica para economizar:**\n\n\
                1. Rastreie todos os gastos por 15 dias\n\
                2. Corte 3 gastos desnecessários este mês\n\
                3. Use a regra 50-30-20 (necessidades-lazer-investimentos)\n\
                4. Estabeleça metas semanais de economia\n\n\
                *Comece hoje mesmo!*"
            .to_string();
    }

    if lower.contains("investir") || lower.contains("aplicar") {
        return "💰 **Estratégia de investimentos:**\n\n\
                1. Reserva de emergência primeiro (6 meses)\n\
                2. Renda fixa para segurança\n\
                3. Diversificação é a chave\n\
                4. Invista regularmente, não espere o momento perfeito\n\n\
                *Sugestão: Reserve 15% da renda*"
            .to_string();
    }

    if lower.contains("dívida") || lower.contains("divida") {
        return "🎯 **Plano anti-dívidas:**\n\n\
                1. Liste TODAS as dívidas\n\
                2. Ataque as de juros mais altos primeiro\n\
                3. Renegocie com credores\n\
                4. Congele novas dívidas por 30 dias\n\n\
                *Foco: Liberdade financeira!*"
            .to_string();
    }

    if lower.contains("saldo") || lower.contains("como estou") {
        return "📊 **Análise financeira:**\n\n\
                Para uma análise completa:\n\
                1. Adicione suas receitas e despesas\n\
                2. Classifique por categorias\n\
                3. Acompanhe diariamente\n\
                4. Estabeleça metas realistas\n\n\
                *Vamos começar? Adicione sua primeira transação!*"
            .to_string();
    }

    "🤖 **FinAssistant aqui!**\n\n\
     No momento estou com limitações técnicas, mas posso ajudar com:\n\n\
     • Controle financeiro básico\n\
     • Dicas de economia\n\
     • Estratégias simples de investimento\n\n\
     *Qual sua dúvida financeira?*"
        .to_string()
}
