// ============================================================================
// MÓDULO DE TEXTOS - Mensajes de interfaz (pt-BR)
// ============================================================================

use std::collections::HashMap;

lazy_static::lazy_static! {
    static ref MESSAGES: HashMap<&'static str, &'static str> = build_messages();
}

/// Diccionario de mensajes de la interfaz
fn build_messages() -> HashMap<&'static str, &'static str> {
    let mut messages = HashMap::new();

    // Router
    messages.insert("titulo_inicio", "Página Inicial");
    messages.insert("titulo_projetos", "Nossos Projetos");
    messages.insert("titulo_cadastro", "Formulário de Cadastro");
    messages.insert("titulo_sobre", "Sobre Nós");
    messages.insert("anuncio_inicio", "Navegado para página inicial");
    messages.insert("anuncio_projetos", "Navegado para página de projetos");
    messages.insert("anuncio_cadastro", "Navegado para formulário de cadastro");
    messages.insert("anuncio_sobre", "Navegado para página sobre nós");
    messages.insert("nova_pagina", "Nova página carregada");
    messages.insert("navegando", "Navegando...");
    messages.insert("navegando_para", "Navegando para {}");
    messages.insert("erro_rota", "Erro ao carregar página. Redirecionando para página inicial.");
    messages.insert("erro_pagina", "Erro ao carregar página");
    messages.insert("pagina_atual", "{} - Página atual");
    messages.insert("navegar_para", "Navegar para {}");

    // Registry
    messages.insert("conteudo_principal", "Conteúdo principal");
    messages.insert("imagem_decorativa", "Imagem decorativa");
    messages.insert("navegado_conteudo", "Navegado para conteúdo principal");

    // Menu
    messages.insert("menu_abrir", "Abrir menu de navegação");
    messages.insert("menu_fechar", "Fechar menu de navegação");
    messages.insert("menu_navegacao", "Navegação principal");
    messages.insert("menu_aberto", "Menu de navegação aberto. Use Tab para navegar e Escape para fechar.");
    messages.insert("menu_fechado", "Menu de navegação fechado");

    // Modales
    messages.insert("modal_fechado", "Modal fechado");
    messages.insert("detalhe_aberto", "Aberto detalhe de {}");
    messages.insert("apoio_aberto", "Modal de apoio aberto para {}");
    messages.insert("apoio_registrado", "Interesse de apoio registrado");

    // Proyectos
    messages.insert("favorito_adicionado", "Adicionado aos favoritos");
    messages.insert("favorito_removido", "Removido dos favoritos");
    messages.insert("favoritar", "Favoritar");
    messages.insert("remover_favorito", "Remover favorito");
    messages.insert("projetos_encontrados", "{} projetos encontrados");

    // Newsletter
    messages.insert("email_invalido", "Email inválido");
    messages.insert("newsletter_ok", "Cadastrado na newsletter");
    messages.insert("newsletter_obrigada", "Obrigada! ✨");
    messages.insert("newsletter_repetido", "Este email já recebe nossas novidades");

    // Formulario
    messages.insert("form_label", "Formulário de cadastro");
    messages.insert("form_erros", "Formulário contém erros. Primeiro campo inválido focado.");
    messages.insert("form_corrija", "Corrija os campos destacados antes de enviar.");
    messages.insert("form_sucesso", "Cadastro enviado com sucesso!");
    messages.insert("form_sucesso_anuncio", "Cadastro enviado com sucesso! Formulário será reiniciado.");
    messages.insert("form_erro_salvar", "Erro ao salvar cadastro. Tente novamente.");
    messages.insert("form_erro_anuncio", "Erro ao enviar formulário. Tente novamente.");
    messages.insert("form_limpo", "Formulário limpo");
    messages.insert("registros_vazio", "Nenhum registro encontrado.");
    messages.insert("registros_erro", "Erro ao carregar registros.");
    messages.insert("registro_excluido", "Registro excluído");
    messages.insert("excluir_registro", "Excluir registro {}");

    // Tema
    messages.insert("tema_claro", "Tema claro ativado");
    messages.insert("tema_escuro", "Tema escuro ativado");
    messages.insert("contraste_ativado", "Alto contraste ativado");
    messages.insert("contraste_desativado", "Alto contraste desativado");

    // Errores genéricos
    messages.insert("erro_inesperado", "Erro inesperado ocorreu");

    messages
}

/// Obtener mensaje por clave
///
/// Devuelve la clave si no existe mensaje
pub fn t(key: &str) -> String {
    MESSAGES
        .get(key)
        .map(|message| message.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Mensaje con marcadores `{}` reemplazados en orden
pub fn t_with(key: &str, args: &[&str]) -> String {
    let mut message = t(key);
    // Cursor tras cada inserción: un argumento con `{}` no se vuelve a rellenar
    let mut cursor = 0;
    for arg in args {
        let Some(pos) = message[cursor..].find("{}").map(|p| p + cursor) else {
            break;
        };
        message.replace_range(pos..pos + 2, arg);
        cursor = pos + arg.len();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_keys() {
        assert_eq!(t("titulo_sobre"), "Sobre Nós");
        assert_eq!(t("clave_inexistente"), "clave_inexistente");
    }

    #[test]
    fn test_placeholders_are_filled_in_order() {
        assert_eq!(t_with("pagina_atual", &["Projetos"]), "Projetos - Página atual");
        assert_eq!(t_with("navegar_para", &["{}"]), "Navegar para {}");
    }

    #[test]
    fn test_argument_with_braces_is_not_refilled() {
        assert_eq!(t_with("navegar_para", &["{}", "extra"]), "Navegar para {}");
        assert_eq!(t_with("excluir_registro", &["Ana {}"]), "Excluir registro Ana {}");
    }
}
