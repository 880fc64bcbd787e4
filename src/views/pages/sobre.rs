// Página estática "Sobre Nós"

pub const MARKUP: &str = r##"<section class="about" aria-labelledby="sobre-title">
    <h2 id="sobre-title" class="section-title">Sobre Nós</h2>
    <p>A Nexus ONG nasceu da vontade de um grupo de amigos de transformar pequenas ações em impacto real nas comunidades onde vivem.</p>
    <div class="about-grid">
        <article class="about-card" aria-labelledby="missao-title">
            <h3 id="missao-title">Missão</h3>
            <p>Conectar voluntários a projetos de educação, saúde, meio ambiente e inclusão digital.</p>
        </article>
        <article class="about-card" aria-labelledby="visao-title">
            <h3 id="visao-title">Visão</h3>
            <p>Ser referência em voluntariado comunitário acessível e transparente.</p>
        </article>
        <article class="about-card" aria-labelledby="valores-title">
            <h3 id="valores-title">Valores</h3>
            <ul>
                <li>Empatia e respeito</li>
                <li>Transparência</li>
                <li>Acessibilidade para todas as pessoas</li>
            </ul>
        </article>
    </div>
    <div class="botoes">
        <a class="botao" href="#cadastro" data-link>Seja voluntário</a>
        <a class="botao botao-secundario" href="#projetos" data-link>Conheça os projetos</a>
    </div>
</section>"##;
