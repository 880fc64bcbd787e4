// ============================================================================
// PROJECT - Catálogo estático de proyectos y filtros de la galería
// ============================================================================

use serde::{Deserialize, Serialize};

/// Descripciones más cortas se completan para ocupar ~3 líneas en la tarjeta
const MIN_DESCRIPTION_CHARS: usize = 160;
const DESCRIPTION_PADDING: &str =
    "Projeto com ações contínuas que envolvem comunidade e resultados mensuráveis.";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub img: String,
    pub tags: Vec<String>,
    pub title: String,
    pub desc: String,
}

impl Project {
    fn new(img: &str, tags: &[&str], title: &str, desc: &str) -> Self {
        Self {
            img: img.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            title: title.to_string(),
            desc: desc.to_string(),
        }
    }

    /// Ruta de la imagen relativa a la raíz del sitio
    pub fn image_path(&self) -> String {
        format!("img/{}", self.img)
    }

    /// Descripción con relleno estándar si es demasiado corta
    pub fn padded_description(&self) -> String {
        let desc = self.desc.trim();
        if desc.chars().count() < MIN_DESCRIPTION_CHARS {
            format!("{} {}", desc, DESCRIPTION_PADDING)
        } else {
            desc.to_string()
        }
    }

    /// Búsqueda sin distinguir mayúsculas en título + descripción + tags
    pub fn matches_text(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        if filter.is_empty() {
            return true;
        }
        let haystack = format!("{} {} {}", self.title, self.desc, self.tags.join(" ")).to_lowercase();
        haystack.contains(&filter)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        tag.is_empty() || self.tags.iter().any(|t| t == tag)
    }
}

/// Proyectos publicados en la galería
pub fn catalog() -> Vec<Project> {
    vec![
        Project::new(
            "meuprojeto1.webp",
            &["educação", "crianças"],
            "Educação para Todos",
            "Apoio escolar e oficinas de reforço para crianças e jovens. Trabalhamos com turmas pequenas, materiais lúdicos e acompanhamento individual, promovendo habilidades para a vida e reduzindo a evasão escolar.",
        ),
        Project::new(
            "meuprojeto2.webp",
            &["saúde", "comunidade"],
            "Saúde Comunitária",
            "Ações e campanhas de prevenção em comunidades com triagens, oficinas de nutrição e suporte em saúde mental, realizadas em parceria com profissionais voluntários e centros locais.",
        ),
        Project::new(
            "projeto1.webp",
            &["meio ambiente", "reflorestamento"],
            "Cuidando do Verde",
            "Mutirões de reflorestamento e educação ambiental em escolas e praças. Inclui oficinas práticas, plantio de mudas e ações de sensibilização para famílias e estudantes.",
        ),
        Project::new(
            "projeto2.webp",
            &["inclusão digital", "emprego"],
            "Conexão e Trabalho",
            "Cursos de informática e empreendedorismo para inserir pessoas no mercado de trabalho, com aulas práticas, mentoria e apoio para montagem de currículo e vagas.",
        ),
    ]
}

/// Tags sin repetir, en orden de primera aparición
pub fn all_tags(projects: &[Project]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in projects.iter().flat_map(|p| p.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Aplicar búsqueda de texto y tag activo (vacío = sin filtro)
pub fn filter_projects<'a>(projects: &'a [Project], text: &str, active_tag: &str) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| p.matches_text(text) && p.has_tag(active_tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_deduplicated_in_first_seen_order() {
        let projects = vec![
            Project::new("a.webp", &["b", "a"], "A", ""),
            Project::new("b.webp", &["a", "c"], "B", ""),
        ];
        assert_eq!(all_tags(&projects), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_filter_by_text_and_tag() {
        let projects = catalog();
        let by_text = filter_projects(&projects, "REFLORESTAMENTO", "");
        assert_eq!(by_text.len(), 1);
        assert_eq!(by_text[0].title, "Cuidando do Verde");

        let by_tag = filter_projects(&projects, "", "saúde");
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].title, "Saúde Comunitária");

        assert!(filter_projects(&projects, "oficinas", "emprego").is_empty());
        assert_eq!(filter_projects(&projects, "  ", "").len(), projects.len());
    }

    #[test]
    fn test_short_descriptions_are_padded() {
        let short = Project::new("x.webp", &[], "X", "Curta.");
        assert_eq!(short.padded_description(), format!("Curta. {}", DESCRIPTION_PADDING));

        let long = &catalog()[0];
        assert_eq!(long.padded_description(), long.desc);
    }
}
