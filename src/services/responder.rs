//! Keyword responder for the assistant
//!
//! Answers come from an ordered rule table. A rule matches when every one of
//! its keyword groups has at least one keyword contained in the lower-cased
//! question; the first matching rule wins.

/// One row of the answer table
struct Regra {
    grupos: &'static [&'static [&'static str]],
    resposta: &'static str,
}

impl Regra {
    fn casa(&self, pergunta: &str) -> bool {
        self.grupos
            .iter()
            .all(|grupo| grupo.iter().any(|palavra| pergunta.contains(palavra)))
    }
}

const TRANSFERENCIA: &[&str] = &["transfer", "propriedade"];
const LICENCIAMENTO: &[&str] = &["licencia", "anual"];
const CNH: &[&str] = &["cnh", "habilitação"];
const SEGUNDA_VIA: &[&str] = &["segunda via", "perdi"];

const REGRAS: &[Regra] = &[
    Regra { grupos: &[TRANSFERENCIA, &["documento"]], resposta: TRANSFERENCIA_DOCUMENTOS },
    Regra { grupos: &[TRANSFERENCIA, &["prazo"]], resposta: TRANSFERENCIA_PRAZO },
    Regra { grupos: &[LICENCIAMENTO, &["fazer", "como"]], resposta: LICENCIAMENTO_COMO_FAZER },
    Regra { grupos: &[LICENCIAMENTO, &["valor", "custa"]], resposta: LICENCIAMENTO_VALORES },
    Regra { grupos: &[CNH, &["renovar", "vencida"]], resposta: CNH_RENOVACAO },
    Regra { grupos: &[CNH, &["categoria", "mudança"]], resposta: CNH_MUDANCA_CATEGORIA },
    Regra { grupos: &[SEGUNDA_VIA, &["crv", "documento"]], resposta: SEGUNDA_VIA_CRV },
    Regra { grupos: &[SEGUNDA_VIA, &["cnh"]], resposta: SEGUNDA_VIA_CNH },
    Regra { grupos: &[&["restrição", "judicial"]], resposta: RESTRICAO_JUDICIAL },
    Regra { grupos: &[&["débito", "ipva", "multa"]], resposta: DEBITOS_EM_ATRASO },
];

/// Category keywords, checked in order; `Geral` when nothing matches
const CATEGORIAS: &[(&[&str], &str)] = &[
    (TRANSFERENCIA, "Transferência"),
    (LICENCIAMENTO, "Licenciamento"),
    (CNH, "CNH"),
    (&["documento", "crv"], "Documentação"),
    (&["regulariz", "débito"], "Regularização"),
];

pub const CATEGORIA_GERAL: &str = "Geral";

/// Static answer for a question
pub fn responder(pergunta: &str) -> &'static str {
    let pergunta = pergunta.to_lowercase();
    REGRAS
        .iter()
        .find(|regra| regra.casa(&pergunta))
        .map_or(MENU_PADRAO, |regra| regra.resposta)
}

/// Category a question falls into
pub fn categorizar(pergunta: &str) -> &'static str {
    let pergunta = pergunta.to_lowercase();
    CATEGORIAS
        .iter()
        .find(|(palavras, _)| palavras.iter().any(|p| pergunta.contains(p)))
        .map_or(CATEGORIA_GERAL, |&(_, categoria)| categoria)
}

const TRANSFERENCIA_DOCUMENTOS: &str = r#"Para transferir um veículo, você precisa dos seguintes documentos:

📋 **Documentos necessários:**
• CRV (Certificado de Registro do Veículo) preenchido e assinado
• Comprovante de quitação de débitos (IPVA, licenciamento, multas)
• Documento de identidade e CPF do comprador e vendedor
• Comprovante de residência atualizado
• Laudo de vistoria (se necessário)

⚠️ **Importante:** A transferência deve ser feita em até 30 dias após a compra.

💰 **Custos:** Taxa de transferência + eventuais tributos pendentes.

📍 Procure um Detran ou despachante credenciado para realizar o processo."#;

const TRANSFERENCIA_PRAZO: &str = r#"⏰ **Prazo para transferência:** 30 dias corridos

A transferência de propriedade deve ser realizada em até **30 dias** após a data de compra do veículo.

⚠️ **Multa por atraso:** R$ 293,47 (valor sujeito a alteração)

📋 **Para cumprir o prazo:**
• Quite todos os débitos pendentes
• Providencie a documentação necessária
• Agende atendimento no Detran ou despachante

💡 **Dica:** Inicie o processo o quanto antes para evitar complicações e multas."#;

const LICENCIAMENTO_COMO_FAZER: &str = r#"🚗 **Como fazer o licenciamento anual:**

📋 **Documentos necessários:**
• CRV (Certificado de Registro do Veículo)
• Comprovante de quitação do IPVA
• Comprovante de quitação do seguro DPVAT
• Certificado de inspeção veicular (se obrigatório)

💻 **Como fazer:**
1. Acesse o site do Detran do seu estado
2. Quite o IPVA e taxas pendentes
3. Solicite o novo CRLV
4. Aguarde a entrega pelos Correios

📱 **Digital:** Na maioria dos estados, o CRLV digital já está disponível no app do Detran."#;

const LICENCIAMENTO_VALORES: &str = r#"💰 **Valores do licenciamento no RJ (2024):**

🚗 **Automóvel:** R$ 156,13
🏍️ **Motocicleta:** R$ 78,06
🚐 **Caminhonete:** R$ 234,19

**Taxas adicionais:**
• DPVAT: Consultar valor atual
• IPVA: 4% do valor venal (automóveis)

⚠️ **Valores sujeitos a alteração**

💡 **Importante:** Valores podem variar conforme o estado e tipo de veículo. Consulte sempre o site oficial do Detran."#;

const CNH_RENOVACAO: &str = r#"🆔 **Renovação de CNH vencida:**

📋 **Documentos necessários:**
• RG e CPF
• Comprovante de residência
• Exame médico e psicotécnico
• Taxa de renovação

⚠️ **CNH vencida há mais de 5 anos:** Será necessário refazer os exames teórico e prático.

🚫 **Importante:** Com CNH vencida, você NÃO pode dirigir. É infração grave com multa de R$ 293,47 e retenção do veículo.

📅 **Validade:** 10 anos (até 50 anos), 5 anos (50-70 anos), 3 anos (acima de 70 anos)."#;

const CNH_MUDANCA_CATEGORIA: &str = r#"🔄 **Mudança de categoria B para D:**

📋 **Requisitos:**
• Ter CNH categoria B há pelo menos 2 anos
• Não ter cometido infração grave/gravíssima nos últimos 12 meses
• Idade mínima: 21 anos

📚 **Processo:**
1. Curso teórico-técnico (50 horas/aula)
2. Exame teórico específico
3. Aulas práticas (20 horas/aula mínimo)
4. Exame prático de direção

💰 **Custo aproximado:** R$ 1.500 a R$ 3.000 (varia por auto escola)

⏰ **Tempo:** 2 a 4 meses em média"#;

const SEGUNDA_VIA_CRV: &str = r#"📄 **Segunda via do CRV:**

📋 **Documentos necessários:**
• RG e CPF do proprietário
• Comprovante de residência atualizado
• Boletim de Ocorrência (se foi roubado/furtado)
• Comprovante de quitação de débitos

💻 **Como solicitar:**
1. Acesse o site do Detran do seu estado
2. Preencha o formulário online
3. Pague a taxa (aprox. R$ 156,13 no RJ)
4. Aguarde entrega pelos Correios (15-20 dias)

⚠️ **Importante:** Enquanto aguarda, você pode imprimir o CRV provisório do site do Detran."#;

const SEGUNDA_VIA_CNH: &str = r#"🆔 **Segunda via da CNH:**

📋 **Documentos necessários:**
• RG e CPF
• Comprovante de residência
• Boletim de Ocorrência (se roubada/furtada)
• Foto 3x4 recente

💻 **Como solicitar:**
1. Acesse o site do Detran
2. Solicite a segunda via online
3. Pague a taxa (aprox. R$ 156,13)
4. Agende retirada ou receba pelos Correios

📱 **CNH Digital:** Baixe o app CDT para ter sua CNH digital enquanto aguarda a física.

⏰ **Prazo:** 5-10 dias úteis"#;

const RESTRICAO_JUDICIAL: &str = r#"⚖️ **Veículo com restrição judicial:**

🔍 **Como verificar:** Consulte o site do Detran com placa/chassi

📋 **Tipos de restrição:**
• Alienação fiduciária
• Reserva de domínio
• Penhora/arresto
• Comunicação de venda

🛠️ **Como resolver:**
1. Identifique o tipo de restrição
2. Quite o financiamento (se aplicável)
3. Solicite baixa junto ao credor
4. Acompanhe a atualização no sistema

⚠️ **Importante:** Veículo com restrição não pode ser transferido. Procure orientação jurídica se necessário."#;

const DEBITOS_EM_ATRASO: &str = r#"💰 **Como quitar débitos em atraso:**

📋 **Tipos de débito:**
• IPVA atrasado
• Licenciamento em atraso
• Multas de trânsito
• Taxa de vistoria

💻 **Como quitar:**
1. Consulte débitos no site do Detran
2. Gere boleto ou use PIX
3. Quite preferencialmente tudo junto
4. Aguarde compensação (1-2 dias úteis)

💡 **Parcelamento:** Alguns estados permitem parcelamento de débitos. Consulte as condições no Detran.

⚠️ **Importante:** Débitos em atraso impedem licenciamento e transferência do veículo."#;

const MENU_PADRAO: &str = r#"Olá! Sou seu assistente virtual para serviços veiculares. 

Posso ajudar você com:
🚗 Transferência de veículos
📋 Licenciamento anual
🆔 CNH e habilitação
📄 Segunda via de documentos
⚖️ Regularização de pendências

Digite sua dúvida específica ou escolha uma das perguntas frequentes no menu acima.

Para atendimento personalizado, clique em "Atendente" para falar conosco pelo WhatsApp!"#;
