// ============================================================================
// PROJETOS - Galería filtrable de proyectos
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::models::Project;
use crate::state::AppState;
use crate::utils::i18n::t;
use crate::utils::sanitize::escape_html;
use crate::viewmodels::ProjectsViewModel;

pub const MARKUP: &str = r##"<section aria-labelledby="projects-title">
    <h2 id="projects-title">Nossos Projetos</h2>
    <div class="projects-toolbar" role="search" aria-label="Filtrar projetos">
        <input id="projects-search" type="search" placeholder="Pesquisar..." aria-label="Pesquisar projetos">
        <div id="projects-tags" class="projects-tags" role="group" aria-label="Categorias"></div>
    </div>
    <div class="projects-grid" id="projects-gallery" role="list" aria-label="Lista de projetos"></div>
    <p class="small-help">
        <span class="heart-mini" aria-hidden="true">❤</span>
        <span class="sr-only">Favoritar</span> para salvar
    </p>
</section>"##;

pub fn on_mount(root: &Element, state: &AppState) -> Result<(), JsValue> {
    ProjectsViewModel::mount(root, state)
}

/// Botones de categoría (aria-pressed refleja el tag activo)
pub fn tag_buttons_markup(tags: &[String], active_tag: &str) -> String {
    tags.iter()
        .map(|tag| {
            let pressed = tag == active_tag;
            format!(
                r#"<button class="tag-btn{}" data-tag="{}" aria-pressed="{}">{}</button>"#,
                if pressed { " active" } else { "" },
                escape_html(tag),
                pressed,
                escape_html(tag)
            )
        })
        .collect()
}

/// Tarjeta de proyecto; todo el texto interpolado va escapado
pub fn card_markup(project: &Project, index: usize, is_favorite: bool) -> String {
    let title = escape_html(&project.title);
    let desc = escape_html(&project.padded_description());
    let img = escape_html(&project.image_path());
    let title_id = format!("project-title-{}", index);
    let tags = project
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag-chip">{}</span>"#, escape_html(tag)))
        .collect::<Vec<_>>()
        .join(" ");
    let (fav_label, heart) = if is_favorite {
        (t("remover_favorito"), "❤")
    } else {
        (t("favoritar"), "♡")
    };

    format!(
        r#"<div class="project-card reveal" role="listitem" tabindex="0" aria-labelledby="{title_id}"
     data-title="{title}" data-desc="{desc}" data-img="{img}" style="animation-delay:{delay}ms">
    <div class="card-media">
        <img src="{img}" alt="{title}" loading="lazy">
        <div class="card-overlay">
            <button class="card-btn primary" data-action="details" aria-label="Detalhes de {title}">Saiba mais</button>
        </div>
        <button class="fav-heart" aria-label="{fav_label}" aria-pressed="{is_favorite}" data-action="favorite" data-project="{title}">
            <span class="heart-icon">{heart}</span>
        </button>
    </div>
    <div class="body">
        <h3 id="{title_id}">{title}</h3>
        <div class="tags">{tags}</div>
        <p class="desc">{desc}</p>
        <div class="card-actions">
            <button class="card-btn" data-action="support" aria-label="Apoiar {title}">Apoiar</button>
        </div>
    </div>
</div>"#,
        delay = index * 100,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::catalog;

    #[test]
    fn test_card_markup_escapes_user_visible_text() {
        let project = Project {
            img: "x.webp".into(),
            tags: vec!["<script>".into()],
            title: "A \"B\" & C".into(),
            desc: "x".repeat(200),
        };
        let html = card_markup(&project, 2, false);
        assert!(html.contains(r#"data-title="A &quot;B&quot; &amp; C""#));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("animation-delay:200ms"));
        assert!(html.contains(r#"aria-pressed="false""#));
        assert!(html.contains("♡"));
    }

    #[test]
    fn test_favorite_card_state() {
        let html = card_markup(&catalog()[0], 0, true);
        assert!(html.contains(r#"aria-pressed="true""#));
        assert!(html.contains("Remover favorito"));
        assert!(html.contains("img/meuprojeto1.webp"));
    }

    #[test]
    fn test_tag_buttons_mark_active() {
        let tags = vec!["saúde".to_string(), "emprego".to_string()];
        let html = tag_buttons_markup(&tags, "emprego");
        assert!(html.contains(r#"data-tag="saúde" aria-pressed="false""#));
        assert!(html.contains(r#"class="tag-btn active" data-tag="emprego" aria-pressed="true""#));
    }
}
