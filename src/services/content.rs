//! Static content served by the public API

/// One FAQ question and its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    pub pergunta: &'static str,
    pub resposta: &'static str,
}

/// Suggested question offered by the assistant menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerguntaPredefinida {
    pub id: u32,
    pub categoria: &'static str,
    pub titulo: &'static str,
    pub pergunta: &'static str,
}

pub const FAQ: &[FaqEntry] = &[
    FaqEntry {
        pergunta: "Como funciona o processo de transferência entre estados?",
        resposta: "Nosso processo é 100% digital. Você nos envia a documentação via WhatsApp, nós cuidamos de toda a burocracia junto aos órgãos competentes (DETRAN) e você recebe os documentos em casa. O processo leva de 15 a 30 dias úteis dependendo do estado.",
    },
    FaqEntry {
        pergunta: "Quais documentos preciso enviar para iniciar o processo?",
        resposta: "Para transferência de propriedade você precisa: RG, CPF, comprovante de residência atual, CRLV (documento do veículo), comprovante de quitação de financiamento (se houver). Todos podem ser enviados por foto via WhatsApp.",
    },
    FaqEntry {
        pergunta: "Os valores incluem todas as taxas?",
        resposta: "Nossos valores incluem nossa taxa de serviço e orientação completa. As taxas dos órgãos públicos (DETRAN, cartório) são cobradas à parte e informadas previamente. Sempre trabalhamos com total transparência nos custos.",
    },
    FaqEntry {
        pergunta: "Quanto tempo demora cada tipo de serviço?",
        resposta: "• Transferência entre estados: 15-30 dias úteis\n• Licenciamento digital: 5-10 dias úteis\n• Renovação CNH: 10-15 dias úteis\n• Segunda via documentos: 7-15 dias úteis\n• Conversão GNV: 20-30 dias úteis\n• Registro ANTT: 30-45 dias úteis",
    },
    FaqEntry {
        pergunta: "Como é feito o pagamento?",
        resposta: "Aceitamos pagamento via PIX (chave: 22992090682), transferência bancária, cartão de débito/crédito. O pagamento pode ser feito em parcelas dependendo do valor do serviço. QR Code PIX disponível no site.",
    },
    FaqEntry {
        pergunta: "Vocês atendem em quais estados?",
        resposta: "Atendemos nos estados do Rio de Janeiro (RJ), São Paulo (SP), Espírito Santo (ES) e Minas Gerais (MG). Nosso escritório fica em Araruama-RJ, mas o atendimento é 100% digital.",
    },
    FaqEntry {
        pergunta: "E se houver algum problema com o documento?",
        resposta: "Oferecemos suporte completo durante todo o processo. Se houver qualquer irregularidade ou problema, entramos em contato imediatamente e orientamos sobre os próximos passos. Nossa responsabilidade vai até a conclusão do serviço.",
    },
    FaqEntry {
        pergunta: "Como acompanhar o andamento do meu processo?",
        resposta: "Você recebe atualizações constantes via WhatsApp sobre o andamento do seu processo. Também pode entrar em contato a qualquer momento durante nosso horário de atendimento (Segunda a Sexta, 9:30h às 17h).",
    },
    FaqEntry {
        pergunta: "Preciso ir até o DETRAN ou cartório?",
        resposta: "Na maioria dos casos, NÃO! Nosso processo é digital e cuidamos de toda a documentação para você. Em casos específicos (raros), podemos orientar sobre alguma etapa presencial, mas sempre buscamos soluções totalmente digitais.",
    },
    FaqEntry {
        pergunta: "Qual a diferença entre vocês e fazer diretamente no DETRAN?",
        resposta: "Nós oferecemos comodidade, rapidez e expertise. Evitamos filas, burocracias desnecessárias e orientamos sobre todos os passos. Nosso conhecimento dos processos agiliza significativamente os prazos comparado ao atendimento padrão dos órgãos.",
    },
];

pub const PERGUNTAS_PREDEFINIDAS: &[PerguntaPredefinida] = &[
    PerguntaPredefinida {
        id: 1,
        categoria: "Transferência",
        titulo: "Como transferir um veículo?",
        pergunta: "Quais documentos são necessários para fazer a transferência de propriedade de um veículo?",
    },
    PerguntaPredefinida {
        id: 2,
        categoria: "Transferência",
        titulo: "Prazo para transferir veículo",
        pergunta: "Qual o prazo para fazer a transferência de um veículo após a compra?",
    },
    PerguntaPredefinida {
        id: 3,
        categoria: "Licenciamento",
        titulo: "Como fazer licenciamento anual?",
        pergunta: "Como fazer o licenciamento anual do meu veículo? Quais documentos preciso?",
    },
    PerguntaPredefinida {
        id: 4,
        categoria: "Licenciamento",
        titulo: "Valor do licenciamento",
        pergunta: "Quanto custa o licenciamento anual de um veículo no RJ?",
    },
    PerguntaPredefinida {
        id: 5,
        categoria: "CNH",
        titulo: "Renovar CNH vencida",
        pergunta: "Como renovar uma CNH que já está vencida? Posso dirigir enquanto renovo?",
    },
    PerguntaPredefinida {
        id: 6,
        categoria: "CNH",
        titulo: "Mudança de categoria CNH",
        pergunta: "Como fazer mudança de categoria da CNH de B para D?",
    },
    PerguntaPredefinida {
        id: 7,
        categoria: "Documentação",
        titulo: "Segunda via do CRV",
        pergunta: "Como tirar segunda via do CRV (documento do veículo)?",
    },
    PerguntaPredefinida {
        id: 8,
        categoria: "Documentação",
        titulo: "Perdi minha CNH",
        pergunta: "Perdi minha CNH. Como tirar uma segunda via?",
    },
    PerguntaPredefinida {
        id: 9,
        categoria: "Regularização",
        titulo: "Veículo com restrição",
        pergunta: "Meu veículo tem restrição judicial. Como resolver?",
    },
    PerguntaPredefinida {
        id: 10,
        categoria: "Regularização",
        titulo: "Débitos em atraso",
        pergunta: "Como quitar débitos de IPVA e multas em atraso?",
    },
];
