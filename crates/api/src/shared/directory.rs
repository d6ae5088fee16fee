use tutorhub_scheduler_domain::{scheduling::Directory, ID};
use tutorhub_scheduler_infra::SchedulerContext;

/// Loads the given schools together with all of their class groups
pub async fn load_directory(school_ids: &[ID], ctx: &SchedulerContext) -> anyhow::Result<Directory> {
    let schools = ctx.repos.schools.find_many(school_ids).await?;
    let class_groups = ctx.repos.class_groups.find_by_schools(school_ids).await?;
    Ok(Directory::new(schools, class_groups))
}
