//! Embedded single-page UI
//!
//! Served at `/`. A small form + summary + recent list + assistant box
//! driven entirely by the JSON API; presentation only, all bookkeeping
//! lives server-side.

use crate::AppState;
use axum::extract::State;
use axum::response::Html;

pub async fn index_page(State(state): State<AppState>) -> Html<String> {
    let recent_limit = state.config.display.recent_limit;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>FinAssistant</title>
    <style>
        body {{ font-family: sans-serif; max-width: 720px; margin: 0 auto; padding: 16px; background: #f5f5f5; color: #222; }}
        .card {{ background: #fff; border-radius: 8px; padding: 16px; margin-bottom: 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }}
        .totals {{ display: flex; gap: 12px; }}
        .totals div {{ flex: 1; text-align: center; }}
        .totals .value {{ font-size: 1.3em; font-weight: bold; }}
        .income {{ color: #188038; }}
        .expense {{ color: #d93025; }}
        input, select, button, textarea {{ width: 100%; padding: 8px; margin-top: 6px; box-sizing: border-box; }}
        button {{ background: #1a73e8; color: #fff; border: none; border-radius: 4px; cursor: pointer; }}
        button.secondary {{ background: #5f6368; }}
        .tx-row {{ display: flex; justify-content: space-between; padding: 8px 0; border-bottom: 1px solid #eee; }}
        .tx-meta {{ font-size: 0.8em; color: #666; }}
        #resposta {{ white-space: pre-wrap; display: none; margin-top: 12px; background: #f0f4ff; padding: 12px; border-radius: 4px; }}
        .error {{ color: #d93025; }}
    </style>
</head>
<body>
    <h1>💰 FinAssistant</h1>

    <div class="card totals">
        <div><div>Saldo</div><div class="value" id="saldo">0.00</div></div>
        <div><div>Receitas</div><div class="value income" id="receitas">0.00</div></div>
        <div><div>Despesas</div><div class="value expense" id="despesas">0.00</div></div>
    </div>

    <div class="card">
        <h3>Nova transação</h3>
        <select id="kind">
            <option value="income">Receita</option>
            <option value="expense">Despesa</option>
        </select>
        <input id="amount" type="number" step="0.01" min="0" placeholder="Valor">
        <input id="description" type="text" placeholder="Descrição">
        <input id="category" type="text" placeholder="Categoria (opcional)">
        <button onclick="addTransaction()">Adicionar</button>
        <p id="form-error" class="error"></p>
    </div>

    <div class="card">
        <h3>Últimas transações</h3>
        <div id="recent-list"></div>
        <button class="secondary" onclick="exportCsv()">Exportar CSV</button>
        <button class="secondary" onclick="clearLedger()">Limpar tudo</button>
    </div>

    <div class="card">
        <h3>Assistente</h3>
        <textarea id="pergunta" rows="2" placeholder="Faça uma pergunta financeira..."></textarea>
        <button onclick="askAssistant()">Perguntar</button>
        <div id="resposta"></div>
    </div>

    <script>
        const RECENT_LIMIT = {recent_limit};
        let totals = null;

        function money(v) {{
            return 'R$ ' + v.toFixed(2);
        }}

        async function refresh() {{
            const res = await fetch('/api/transactions');
            const data = await res.json();
            totals = data.totals;
            document.getElementById('saldo').textContent = money(totals.balance);
            document.getElementById('receitas').textContent = money(totals.income);
            document.getElementById('despesas').textContent = money(totals.expense);

            const list = document.getElementById('recent-list');
            const recent = data.transactions.slice(0, RECENT_LIMIT);
            if (recent.length === 0) {{
                list.innerHTML = '<p class="tx-meta">Nenhuma transação</p>';
                return;
            }}
            list.innerHTML = recent.map(function (t) {{
                const sign = t.kind === 'income' ? '+' : '-';
                const cls = t.kind === 'income' ? 'income' : 'expense';
                return '<div class="tx-row"><div><div>' + t.description +
                    '</div><div class="tx-meta">' + t.date + ' · ' + t.category +
                    '</div></div><div class="' + cls + '">' + sign + ' ' + money(t.amount) + '</div></div>';
            }}).join('');
        }}

        async function addTransaction() {{
            const body = {{
                kind: document.getElementById('kind').value,
                amount: document.getElementById('amount').value,
                description: document.getElementById('description').value,
                category: document.getElementById('category').value
            }};
            const res = await fetch('/api/transactions', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify(body)
            }});
            const errEl = document.getElementById('form-error');
            if (!res.ok) {{
                const err = await res.json();
                errEl.textContent = err.error || 'Erro ao adicionar';
                return;
            }}
            errEl.textContent = '';
            document.getElementById('amount').value = '';
            document.getElementById('description').value = '';
            refresh();
        }}

        async function clearLedger() {{
            if (!confirm('Apagar todas as transações? Esta ação é irreversível.')) return;
            await fetch('/api/transactions?confirm=true', {{ method: 'DELETE' }});
            refresh();
        }}

        function exportCsv() {{
            window.location = '/api/export';
        }}

        async function askAssistant() {{
            const message = document.getElementById('pergunta').value;
            const out = document.getElementById('resposta');
            out.style.display = 'block';
            out.textContent = '🤔 Pensando...';
            const body = {{ message: message }};
            if (totals) {{
                body.financialData = {{
                    balance: totals.balance,
                    income: totals.income,
                    expense: totals.expense,
                    transactionCount: totals.count
                }};
            }}
            const res = await fetch('/api/assistant', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify(body)
            }});
            const data = await res.json();
            out.textContent = data.response || data.error || 'Erro inesperado';
        }}

        refresh();
    </script>
</body>
</html>"#,
        recent_limit = recent_limit
    ))
}
