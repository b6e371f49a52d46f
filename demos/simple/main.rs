use std::sync::Arc;

use appcues::{
    activity::Properties, experience::Experience, Appcues, AppcuesConfig, Collaborators,
    ExperienceRenderer, RenderError,
};

struct PrintRenderer;

impl ExperienceRenderer for PrintRenderer {
    fn show(&self, experience: Arc<Experience>) -> Result<(), RenderError> {
        println!("Showing {} ({})", experience.name, experience.id);
        Ok(())
    }
}

pub fn main() {
    let account_id = std::env::var("APPCUES_ACCOUNT_ID").unwrap();
    let application_id = std::env::var("APPCUES_APPLICATION_ID").unwrap();
    let config = AppcuesConfig::new(account_id, application_id);

    let collaborators = Collaborators::with_api(&config, Arc::new(PrintRenderer)).unwrap();
    let appcues = Appcues::new(config, collaborators);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        // Identifying starts a session, which downloads the on-device qualification bundle.
        appcues
            .identify("test-user", Properties::new())
            .await
            .unwrap();

        let experience = appcues.screen("Home").await.unwrap();
        println!("Qualified: {:?}", experience.map(|it| it.id.clone()));
    });
}
