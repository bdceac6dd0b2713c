use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::{
    entities::{projeto::ProjetoFiltro, site::SiteInfo},
    errors::AppError,
    repositories::projetos::JsonProjetoStore,
    use_cases::paginas,
};

/// Renders every parameterless route to `index.html` files under the
/// output directory, mirroring the trailing-slash URL convention of
/// static hosts.
pub struct Freezer {
    out_dir: PathBuf,
    frontend_data_file: PathBuf,
    site: SiteInfo,
    store: JsonProjetoStore,
}

#[derive(Debug)]
pub struct FreezeReport {
    pub files: usize,
    pub bytes: u64,
}

impl Freezer {
    pub fn new(
        out_dir: &Path,
        frontend_data_file: &Path,
        site: SiteInfo,
        store: JsonProjetoStore,
    ) -> Self {
        Freezer {
            out_dir: out_dir.to_path_buf(),
            frontend_data_file: frontend_data_file.to_path_buf(),
            site,
            store,
        }
    }

    pub async fn build(&self) -> Result<FreezeReport, AppError> {
        self.clean()?;

        self.write_page("index.html", paginas::render_index(&self.store, &self.site).await?)?;
        self.write_page(
            "projetos/index.html",
            paginas::render_projetos(&self.store, &self.site, &ProjetoFiltro::default()).await?,
        )?;
        self.write_page("sobre/index.html", paginas::render_sobre(&self.site)?)?;
        // The form still renders in static mode; it just has nowhere to
        // submit to.
        self.write_page("contato/index.html", paginas::render_contato(&self.site, None)?)?;

        self.copy_aux_files()?;

        // Static hosts serve this for unknown paths; the route walk
        // cannot enumerate failing URLs, so it is written directly.
        self.write_page("404.html", paginas::render_404())?;

        let report = self.report();
        info!("Site estático gerado em {} ({} arquivos, {} bytes)",
            self.out_dir.display(), report.files, report.bytes);

        Ok(report)
    }

    fn clean(&self) -> Result<(), AppError> {
        if self.out_dir.exists() {
            info!("Limpando {}", self.out_dir.display());
            std::fs::remove_dir_all(&self.out_dir)?;
        }
        std::fs::create_dir_all(&self.out_dir)?;
        Ok(())
    }

    fn write_page(&self, relative: &str, body: String) -> Result<(), AppError> {
        let path = self.out_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, body)?;
        info!("Gerado {}", relative);
        Ok(())
    }

    fn copy_aux_files(&self) -> Result<(), AppError> {
        if self.frontend_data_file.exists() {
            let target = self.out_dir.join("static/data/projects.json");
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&self.frontend_data_file, &target)?;
            info!("projects.json copiado");
        }

        // Custom-domain marker used by GitHub Pages.
        if Path::new("CNAME").exists() {
            std::fs::copy("CNAME", self.out_dir.join("CNAME"))?;
            info!("CNAME copiado");
        }

        // Disables Jekyll processing on GitHub Pages.
        std::fs::write(self.out_dir.join(".nojekyll"), "")?;

        Ok(())
    }

    fn report(&self) -> FreezeReport {
        let mut files = 0;
        let mut bytes = 0;

        for entry in WalkDir::new(&self.out_dir).into_iter().flatten() {
            if entry.file_type().is_file() {
                files += 1;
                bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
            }
        }

        FreezeReport { files, bytes }
    }
}
