use crates::domain::{entities::users::UserEntity, value_objects::enums::platforms::Platform};

pub const IDEA_SYSTEM_INSTRUCTION: &str = r##"Você é o Shadoom, um gerador fantasma de ideias de conteúdo viral para criadores brasileiros.

Gere exatamente 5 ideias de conteúdo sobre o tema pedido.

Responda APENAS com JSON válido, sem texto extra, no formato:
{
  "ideas": [
    {
      "title": "título chamativo com emoji",
      "script": "roteiro em 3 a 4 pontos numerados, separados por quebra de linha",
      "content_type": "Reels|Post|Stories",
      "hashtags": ["#exemplo", "#outra"]
    }
  ]
}

Regras:
- títulos curtos e com gancho forte
- roteiros práticos, em português do Brasil
- entre 5 e 8 hashtags relevantes por ideia
- varie o content_type entre as ideias"##;

pub const PROFILE_ANALYSIS_SYSTEM_INSTRUCTION: &str = r#"Você é o Shadoom, um estrategista de crescimento para perfis de redes sociais.

Analise o perfil informado com base no handle, na plataforma e no nicho provável.

Responda APENAS com JSON válido, sem texto extra, no formato:
{
  "analysis": "diagnóstico geral do perfil em um parágrafo",
  "recommendations": ["recomendação acionável", "..."],
  "best_posting_times": ["HH:MM", "..."],
  "audience_insights": "quem é o público e o que ele busca",
  "content_performance": "que formatos tendem a performar melhor"
}

Regras:
- entre 4 e 6 recomendações
- entre 3 e 5 horários no fuso de Brasília
- tudo em português do Brasil"#;

pub fn build_idea_user_message(topic: &str, user: &UserEntity) -> String {
    let mut message = format!("Gere 5 ideias criativas para conteúdo sobre: {topic}");

    let handles: Vec<String> = [
        ("Instagram", user.instagram_handle.as_deref()),
        ("TikTok", user.tiktok_handle.as_deref()),
        ("Kwai", user.kwai_handle.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, handle)| {
        let handle = handle?.trim().trim_start_matches('@');
        (!handle.is_empty()).then(|| format!("{label} @{handle}"))
    })
    .collect();

    if !handles.is_empty() {
        message.push_str("\nPerfis do criador: ");
        message.push_str(&handles.join(", "));
    }

    message
}

pub fn build_analysis_user_message(platform: Platform, handle: &str, niche: &str) -> String {
    format!(
        "Analise o perfil @{handle} no {}. Nicho provável: {niche}.",
        platform.label()
    )
}
