// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、上游站点、批量客户端和指标导出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 上游成绩站点配置
    pub upstream: UpstreamSettings,
    /// 批量客户端配置
    pub client: ClientSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 前端静态资源目录（未设置时不提供静态文件）
    pub static_dir: Option<String>,
}

/// 上游站点配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    /// 成绩页URL模板，`{id}` 会被替换为准考证号
    pub result_url_template: String,
    /// CORS 中继前缀，原始URL编码后拼接在其后
    pub proxy_prefix: String,
    /// 伪装请求携带的 Referer
    pub referer: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// 最大重定向次数
    pub max_redirects: usize,
    /// 最大重试次数
    pub max_retries: u32,
    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            result_url_template: "https://bisefsd.edu.pk/results/{id}.html".to_string(),
            proxy_prefix: "https://corsproxy.io/?".to_string(),
            referer: "https://bisefsd.edu.pk/".to_string(),
            timeout_secs: 10,
            max_redirects: 5,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

/// 批量客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    /// 生产环境主机名，命中时API使用同源相对路径
    pub production_hostname: String,
    /// 当前部署主机名
    pub hostname: String,
    /// 开发环境API基础地址
    pub development_base_url: String,
    /// 默认批大小
    pub batch_size: usize,
    /// 默认起始准考证号
    pub default_start_id: u64,
    /// 默认抓取数量
    pub default_total: u64,
}

impl ClientSettings {
    /// 根据主机名解析API基础地址
    ///
    /// 生产主机名返回空字符串（同源相对路径），其余返回开发环境绝对地址
    pub fn api_base_for(&self, hostname: &str) -> &str {
        if hostname == self.production_hostname {
            ""
        } else {
            &self.development_base_url
        }
    }

    /// 解析可直接用于HTTP客户端的绝对API基础地址
    ///
    /// 相对路径按当前主机名的 https 源补全
    pub fn absolute_api_base(&self) -> String {
        let base = self.api_base_for(&self.hostname);
        if base.is_empty() {
            format!("https://{}", self.hostname)
        } else {
            base.trim_end_matches('/').to_string()
        }
    }
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出器
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与
    /// `BISE_RESULTS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("BISE_RESULTS").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值构建配置，不读取文件和环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let upstream = UpstreamSettings::default();
        Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Upstream site
            .set_default("upstream.result_url_template", upstream.result_url_template)?
            .set_default("upstream.proxy_prefix", upstream.proxy_prefix)?
            .set_default("upstream.referer", upstream.referer)?
            .set_default("upstream.timeout_secs", upstream.timeout_secs)?
            .set_default("upstream.max_redirects", upstream.max_redirects as u64)?
            .set_default("upstream.max_retries", upstream.max_retries)?
            .set_default("upstream.retry_delay_ms", upstream.retry_delay_ms)?
            // Batch client
            .set_default("client.production_hostname", "result.mahmedraza.fun")?
            .set_default("client.hostname", "localhost")?
            .set_default("client.development_base_url", "http://localhost:5000")?
            .set_default("client.batch_size", 10)?
            .set_default("client.default_start_id", 409360)?
            .set_default("client.default_total", 100)?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
