//! Turns raw model text into exactly [`IDEAS_PER_BATCH`] well-formed ideas.
//!
//! Pure and deterministic: the same raw text and topic always yield the same
//! drafts. Anything unparseable falls back to a fixed template set.

use crates::domain::value_objects::{
    content_ideas::IdeaDraft, enums::content_types::ContentType, plans::IDEAS_PER_BATCH,
};
use serde::Deserialize;

const DEFAULT_TOPIC_SLUG: &str = "conteudo";

const FITNESS_KEYWORDS: [&str; 11] = [
    "fitness",
    "academia",
    "treino",
    "musculação",
    "musculacao",
    "exercício",
    "exercicio",
    "saúde",
    "dieta",
    "gym",
    "workout",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIdeas {
    pub drafts: Vec<IdeaDraft>,
    pub source: DraftSource,
}

impl NormalizedIdeas {
    pub fn fallback(topic: &str) -> Self {
        Self {
            drafts: fallback_ideas(topic),
            source: DraftSource::Fallback,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawIdeaEnvelope {
    ideas: Vec<RawIdea>,
}

#[derive(Debug, Deserialize)]
struct RawIdea {
    title: Option<String>,
    script: Option<String>,
    content_type: Option<String>,
    hashtags: Option<Vec<String>>,
}

pub fn normalize_ideas(raw: &str, topic: &str) -> NormalizedIdeas {
    let Ok(envelope) = serde_json::from_str::<RawIdeaEnvelope>(strip_code_fences(raw)) else {
        return NormalizedIdeas::fallback(topic);
    };

    if envelope.ideas.is_empty() {
        return NormalizedIdeas::fallback(topic);
    }

    let mut drafts: Vec<IdeaDraft> = envelope
        .ideas
        .into_iter()
        .take(IDEAS_PER_BATCH)
        .enumerate()
        .map(|(position, idea)| idea.into_draft(topic, position))
        .collect();

    let parsed = drafts.len();
    drafts.extend(fallback_ideas(topic).into_iter().skip(parsed));

    NormalizedIdeas {
        drafts,
        source: DraftSource::Model,
    }
}

/// Removes a surrounding Markdown code fence (```json or ```) if present.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Lowercased topic with whitespace removed, used as the mandatory hashtag.
pub fn topic_slug(topic: &str) -> String {
    let slug: String = topic
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if slug.is_empty() {
        DEFAULT_TOPIC_SLUG.to_string()
    } else {
        slug
    }
}

pub fn is_fitness_topic(topic: &str) -> bool {
    let topic = topic.to_lowercase();
    FITNESS_KEYWORDS
        .iter()
        .any(|keyword| topic.contains(keyword))
}

pub fn fallback_ideas(topic: &str) -> Vec<IdeaDraft> {
    let templates = if is_fitness_topic(topic) {
        &FITNESS_TEMPLATES
    } else {
        &GENERIC_TEMPLATES
    };
    let topic_tag = format!("#{}", topic_slug(topic));

    templates
        .iter()
        .map(|template| template.render(topic, &topic_tag))
        .collect()
}

impl RawIdea {
    fn into_draft(self, topic: &str, position: usize) -> IdeaDraft {
        let title = non_blank(self.title)
            .unwrap_or_else(|| format!("💡 Ideia criativa sobre {topic} #{}", position + 1));
        let script = non_blank(self.script).unwrap_or_else(|| default_script(topic));
        let content_type = self
            .content_type
            .as_deref()
            .and_then(ContentType::from_loose)
            .unwrap_or_default();

        let mut hashtags: Vec<String> = self
            .hashtags
            .unwrap_or_default()
            .iter()
            .filter_map(|tag| normalize_hashtag(tag))
            .collect();
        if hashtags.is_empty() {
            hashtags.push(format!("#{}", topic_slug(topic)));
        }

        IdeaDraft {
            title,
            script,
            content_type,
            hashtags,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn normalize_hashtag(tag: &str) -> Option<String> {
    let tag = tag.trim().trim_start_matches('#').trim();
    if tag.is_empty() {
        None
    } else {
        Some(format!("#{tag}"))
    }
}

fn default_script(topic: &str) -> String {
    format!(
        "1. Gancho inicial sobre {topic}\n2. Apresente o ponto principal\n3. Entregue uma dica prática\n4. Chame para ação: comenta e salva!"
    )
}

struct IdeaTemplate {
    title: &'static str,
    script: &'static str,
    content_type: ContentType,
    hashtags: [&'static str; 4],
}

impl IdeaTemplate {
    fn render(&self, topic: &str, topic_tag: &str) -> IdeaDraft {
        let mut hashtags = Vec::with_capacity(self.hashtags.len() + 1);
        hashtags.push(topic_tag.to_string());
        hashtags.extend(self.hashtags.iter().map(|tag| tag.to_string()));

        IdeaDraft {
            title: self.title.replace("{topic}", topic),
            script: self.script.replace("{topic}", topic),
            content_type: self.content_type,
            hashtags,
        }
    }
}

static GENERIC_TEMPLATES: [IdeaTemplate; IDEAS_PER_BATCH] = [
    IdeaTemplate {
        title: "🔥 {topic}: O Segredo que Ninguém Conta",
        script: "1. Comece com uma pergunta intrigante sobre {topic}\n2. Revele o segredo que poucos conhecem\n3. Mostre um exemplo prático\n4. Chame para ação: 'Salva para não esquecer!'",
        content_type: ContentType::Reels,
        hashtags: ["#segredo", "#dicavaliosa", "#viral", "#conteudo"],
    },
    IdeaTemplate {
        title: "✨ Transformei minha vida com {topic}",
        script: "1. Conte como era antes de {topic}\n2. O momento da virada\n3. Os resultados de agora\n4. Convide o público a tentar também",
        content_type: ContentType::Post,
        hashtags: ["#transformacao", "#motivacao", "#inspiracao", "#crescimento"],
    },
    IdeaTemplate {
        title: "🚨 ERRO Fatal que todos cometem com {topic}",
        script: "1. Alerte sobre o erro mais comum em {topic}\n2. Explique por que ele acontece\n3. Mostre o jeito certo\n4. Pergunte: 'Você já cometeu esse erro?'",
        content_type: ContentType::Stories,
        hashtags: ["#erro", "#alerta", "#dica", "#cuidado"],
    },
    IdeaTemplate {
        title: "💰 Como {topic} mudou meu faturamento",
        script: "1. Mostre o número de antes\n2. A estratégia com {topic} que mudou tudo\n3. O resultado em números\n4. Chame para ação: 'Quer saber mais? Comenta aqui!'",
        content_type: ContentType::Reels,
        hashtags: ["#faturamento", "#negocio", "#empreender", "#resultados"],
    },
    IdeaTemplate {
        title: "🎯 {topic} em 60 segundos",
        script: "1. Explique {topic} de forma simples\n2. Dê 3 dicas rápidas\n3. Um exemplo do dia a dia\n4. 'Segue para mais conteúdos assim!'",
        content_type: ContentType::Reels,
        hashtags: ["#rapidinha", "#resumo", "#pratico", "#follow"],
    },
];

static FITNESS_TEMPLATES: [IdeaTemplate; IDEAS_PER_BATCH] = [
    IdeaTemplate {
        title: "💪 {topic}: o treino que mudou meu corpo",
        script: "1. Mostre o antes e depois\n2. Os 3 exercícios que fizeram diferença\n3. Frequência e descanso na rotina de {topic}\n4. Chame para ação: 'Salva para treinar depois!'",
        content_type: ContentType::Reels,
        hashtags: ["#fitness", "#treino", "#academia", "#foco"],
    },
    IdeaTemplate {
        title: "🥗 O que eu como para ter resultado com {topic}",
        script: "1. Café da manhã que sustenta o treino\n2. Refeição pré-treino simples\n3. O pós-treino que ninguém pode pular\n4. Pergunte: 'Qual é a sua refeição favorita?'",
        content_type: ContentType::Post,
        hashtags: ["#dieta", "#alimentacaosaudavel", "#nutricao", "#saude"],
    },
    IdeaTemplate {
        title: "🚫 5 erros de {topic} que travam sua evolução",
        script: "1. Treinar sem aquecer\n2. Carga acima da técnica\n3. Pular o descanso\n4. 'Qual desses você comete? Comenta!'",
        content_type: ContentType::Reels,
        hashtags: ["#erros", "#musculacao", "#dicasfitness", "#evolucao"],
    },
    IdeaTemplate {
        title: "⏱️ Treino de 15 minutos: {topic} em casa",
        script: "1. Aquecimento de 3 minutos\n2. Circuito com 4 exercícios sem equipamento\n3. Alongamento final\n4. 'Marca quem vai treinar com você!'",
        content_type: ContentType::Stories,
        hashtags: ["#treinoemcasa", "#hiit", "#semdesculpas", "#fit"],
    },
    IdeaTemplate {
        title: "🔥 Desafio de 7 dias de {topic}",
        script: "1. Apresente o desafio e a regra do dia\n2. Mostre o dia 1 na prática\n3. Como acompanhar a evolução\n4. 'Comenta EU TOPO para entrar no desafio!'",
        content_type: ContentType::Reels,
        hashtags: ["#desafio", "#projetoverao", "#disciplina", "#gym"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RESPONSE: &str = r##"{
        "ideas": [
            {"title": "Ideia 1", "script": "1. a\n2. b", "content_type": "Post", "hashtags": ["#um", "dois"]},
            {"title": "Ideia 2", "script": "1. a", "content_type": "stories", "hashtags": ["#tres"]},
            {"title": "Ideia 3", "script": "1. a", "content_type": "Reels", "hashtags": ["#quatro"]},
            {"title": "Ideia 4", "script": "1. a", "content_type": "Reels", "hashtags": ["#cinco"]},
            {"title": "Ideia 5", "script": "1. a", "content_type": "Reels", "hashtags": ["#seis"]}
        ]
    }"##;

    #[test]
    fn valid_response_is_used_as_is() {
        let normalized = normalize_ideas(VALID_RESPONSE, "café");
        assert_eq!(normalized.source, DraftSource::Model);
        assert_eq!(normalized.drafts.len(), IDEAS_PER_BATCH);
        assert_eq!(normalized.drafts[0].title, "Ideia 1");
        assert_eq!(normalized.drafts[0].content_type, ContentType::Post);
        assert_eq!(normalized.drafts[0].hashtags, vec!["#um", "#dois"]);
        assert_eq!(normalized.drafts[1].content_type, ContentType::Stories);
    }

    #[test]
    fn fenced_response_matches_unfenced() {
        let fenced = format!("```json\n{VALID_RESPONSE}\n```");
        let bare_fence = format!("```\n{VALID_RESPONSE}\n```");
        assert_eq!(normalize_ideas(&fenced, "café"), normalize_ideas(VALID_RESPONSE, "café"));
        assert_eq!(
            normalize_ideas(&bare_fence, "café"),
            normalize_ideas(VALID_RESPONSE, "café")
        );
    }

    #[test]
    fn free_text_response_uses_fallback() {
        let normalized = normalize_ideas("Claro! Aqui estão algumas ideias...", "café");
        assert_eq!(normalized.source, DraftSource::Fallback);
        assert_eq!(normalized.drafts, fallback_ideas("café"));
        assert_eq!(normalized.drafts.len(), IDEAS_PER_BATCH);
    }

    #[test]
    fn empty_or_wrongly_typed_ideas_use_fallback() {
        assert_eq!(normalize_ideas(r#"{"ideas": []}"#, "café").source, DraftSource::Fallback);
        assert_eq!(
            normalize_ideas(r#"{"ideas": [{"title": 42}]}"#, "café").source,
            DraftSource::Fallback
        );
        assert_eq!(normalize_ideas(r#"{"other": 1}"#, "café").source, DraftSource::Fallback);
        assert_eq!(normalize_ideas("", "café").source, DraftSource::Fallback);
    }

    #[test]
    fn short_list_is_padded_from_fallback_positions() {
        let raw = r##"{"ideas": [{"title": "Só uma", "script": "1. a", "content_type": "Post", "hashtags": ["#x"]}]}"##;
        let normalized = normalize_ideas(raw, "café");
        let fallback = fallback_ideas("café");

        assert_eq!(normalized.drafts.len(), IDEAS_PER_BATCH);
        assert_eq!(normalized.drafts[0].title, "Só uma");
        assert_eq!(normalized.drafts[1..], fallback[1..]);
    }

    #[test]
    fn long_list_is_truncated() {
        let idea = r##"{"title": "t", "script": "s", "content_type": "Reels", "hashtags": ["#h"]}"##;
        let raw = format!(r#"{{"ideas": [{}]}}"#, vec![idea; 8].join(","));
        assert_eq!(normalize_ideas(&raw, "café").drafts.len(), IDEAS_PER_BATCH);
    }

    #[test]
    fn missing_fields_get_topic_defaults() {
        let raw = r##"{"ideas": [{"content_type": "Carrossel 3D", "hashtags": ["  ", "#"]}]}"##;
        let draft = &normalize_ideas(raw, "Marketing Digital").drafts[0];

        assert!(draft.title.contains("Marketing Digital"));
        assert!(draft.script.contains("Marketing Digital"));
        assert_eq!(draft.content_type, ContentType::Reels);
        assert_eq!(draft.hashtags, vec!["#marketingdigital"]);
    }

    #[test]
    fn normalization_is_deterministic() {
        for raw in [VALID_RESPONSE, "not json", r#"{"ideas": [{}]}"#] {
            assert_eq!(normalize_ideas(raw, "viagem"), normalize_ideas(raw, "viagem"));
        }
    }

    #[test]
    fn fitness_topics_use_fitness_templates() {
        let fitness = fallback_ideas("Treino de pernas");
        assert!(fitness[0].hashtags.contains(&"#fitness".to_string()));
        assert_eq!(fitness[0].hashtags[0], "#treinodepernas");

        let generic = fallback_ideas("café");
        assert_eq!(generic[0].title, "🔥 café: O Segredo que Ninguém Conta");
        assert_eq!(generic[0].hashtags[0], "#café");
    }

    #[test]
    fn every_fallback_idea_carries_the_topic_hashtag() {
        for topic in ["fitness", "finanças pessoais", "   "] {
            let tag = format!("#{}", topic_slug(topic));
            for draft in fallback_ideas(topic) {
                assert!(draft.hashtags.contains(&tag));
                assert!(!draft.title.trim().is_empty());
                assert!(!draft.script.trim().is_empty());
            }
        }
    }

    #[test]
    fn blank_topic_slug_uses_default() {
        assert_eq!(topic_slug("  \t"), DEFAULT_TOPIC_SLUG);
        assert_eq!(topic_slug("Vida Saudável"), "vidasaudável");
    }

    #[test]
    fn strips_fences_only_at_the_edges() {
        assert_eq!(strip_code_fences("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
        assert_eq!(strip_code_fences("```"), "");
    }
}
