pub(crate) mod delete;
pub(crate) mod fanout;
pub(crate) mod load;
pub(crate) mod save;

pub(crate) use delete::DeleteExecutor;
pub(crate) use fanout::FanoutExecutor;
pub(crate) use load::LoadExecutor;
pub(crate) use save::SaveExecutor;
