use crates::domain::value_objects::{
    enums::platforms::Platform, profile_analyses::AnalysisDraft,
};
use serde::Deserialize;

use super::{idea_normalizer::strip_code_fences, niche::detect_niche};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAnalysis {
    pub draft: AnalysisDraft,
    pub from_model: bool,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    analysis: Option<String>,
    recommendations: Option<Vec<String>>,
    best_posting_times: Option<Vec<String>>,
    audience_insights: Option<String>,
    content_performance: Option<String>,
}

/// Parses the model's analysis. Fields that are missing or blank are taken
/// from the platform fallback; an unparseable response is replaced entirely.
pub fn normalize_analysis(raw: &str, platform: Platform, handle: &str) -> NormalizedAnalysis {
    let fallback = fallback_analysis(platform, handle);

    let Ok(parsed) = serde_json::from_str::<RawAnalysis>(strip_code_fences(raw)) else {
        return NormalizedAnalysis {
            draft: fallback,
            from_model: false,
        };
    };

    let analysis = model_text(parsed.analysis);
    let recommendations = model_list(parsed.recommendations);
    let best_posting_times = model_list(parsed.best_posting_times);
    let audience_insights = model_text(parsed.audience_insights);
    let content_performance = model_text(parsed.content_performance);

    let from_model = analysis.is_some()
        || recommendations.is_some()
        || best_posting_times.is_some()
        || audience_insights.is_some()
        || content_performance.is_some();

    let draft = AnalysisDraft {
        analysis: analysis.unwrap_or(fallback.analysis),
        recommendations: recommendations.unwrap_or(fallback.recommendations),
        best_posting_times: best_posting_times.unwrap_or(fallback.best_posting_times),
        audience_insights: audience_insights.unwrap_or(fallback.audience_insights),
        content_performance: content_performance.unwrap_or(fallback.content_performance),
    };

    NormalizedAnalysis { draft, from_model }
}

pub fn fallback_analysis(platform: Platform, handle: &str) -> AnalysisDraft {
    let niche = detect_niche(handle);

    match platform {
        Platform::Instagram => AnalysisDraft {
            analysis: format!(
                "O perfil @{handle} tem potencial de crescimento no nicho de {niche} no Instagram. Consistência visual e Reels frequentes são o caminho mais rápido para ampliar o alcance."
            ),
            recommendations: vec![
                format!("Publique de 4 a 5 Reels por semana sobre {niche}"),
                "Use carrosséis educativos para aumentar salvamentos".to_string(),
                "Responda comentários na primeira hora após postar".to_string(),
                "Faça Stories diários com enquetes e caixinhas de perguntas".to_string(),
                format!("Colabore com outros perfis de {niche} em Reels collab"),
            ],
            best_posting_times: strings(&["11:00", "14:00", "19:00", "21:00"]),
            audience_insights: format!(
                "Público entre 18 e 34 anos, interessado em {niche}, que consome conteúdo visual e salva dicas práticas."
            ),
            content_performance: "Reels curtos com gancho nos 3 primeiros segundos e carrosséis educativos tendem a ter o melhor desempenho.".to_string(),
        },
        Platform::TikTok => AnalysisDraft {
            analysis: format!(
                "O perfil @{handle} pode explorar tendências de {niche} no TikTok. O algoritmo favorece frequência e retenção, então vídeos curtos e diretos são prioridade."
            ),
            recommendations: vec![
                "Poste de 1 a 3 vídeos por dia".to_string(),
                format!("Adapte áudios em alta para o universo de {niche}"),
                "Prenda a atenção nos 2 primeiros segundos".to_string(),
                "Crie séries com partes numeradas para gerar recorrência".to_string(),
                "Responda comentários com vídeo".to_string(),
            ],
            best_posting_times: strings(&["07:00", "12:00", "19:00", "22:00"]),
            audience_insights: format!(
                "Público jovem, entre 16 e 28 anos, que descobre conteúdo de {niche} pela página Para Você."
            ),
            content_performance: "Vídeos de 15 a 30 segundos com trends e humor geram mais compartilhamentos.".to_string(),
        },
        Platform::Kwai => AnalysisDraft {
            analysis: format!(
                "O perfil @{handle} tem espaço no Kwai para conteúdo de {niche} com linguagem simples e próxima do público."
            ),
            recommendations: vec![
                "Poste vídeos diariamente para ganhar tração".to_string(),
                format!("Use uma linguagem popular e direta ao falar de {niche}"),
                "Participe dos desafios da plataforma".to_string(),
                "Faça lives semanais para fidelizar seguidores".to_string(),
                "Destaque o texto principal na tela".to_string(),
            ],
            best_posting_times: strings(&["08:00", "12:30", "18:00", "21:30"]),
            audience_insights: format!(
                "Público diverso, com forte presença fora das capitais, que busca entretenimento e dicas de {niche}."
            ),
            content_performance: "Vídeos com humor, desafios e dicas rápidas performam melhor.".to_string(),
        },
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn model_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn model_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    let values: Vec<String> = values?
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();

    (!values.is_empty()).then_some(values)
}
