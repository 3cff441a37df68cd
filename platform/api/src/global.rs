use crate::config::ApiConfig;

pub trait ApiGlobal:
	common::global::GlobalCtx
	+ common::global::GlobalConfigProvider<ApiConfig>
	+ common::global::GlobalDb
	+ common::global::GlobalConfig
	+ Send
	+ Sync
	+ 'static
{
}

impl<T> ApiGlobal for T where
	T: common::global::GlobalCtx
		+ common::global::GlobalConfigProvider<ApiConfig>
		+ common::global::GlobalDb
		+ common::global::GlobalConfig
		+ Send
		+ Sync
		+ 'static
{
}
