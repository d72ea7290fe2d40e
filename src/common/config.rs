// Copyright 2025 Lablup Inc. and Jeongkyu Shin
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

/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Smartctl integration defaults
    pub const DEFAULT_SMARTCTL_PATH: &'static str = "/usr/sbin/smartctl";
    pub const DEFAULT_SMARTCTL_DEVICE_EXCLUDE: &'static str = "";
    pub const DEFAULT_SMARTCTL_INTERVAL: &'static str = "60s";

    // Command execution
    pub const COMMAND_TIMEOUT_SECS: u64 = 5;

    // Server
    pub const DEFAULT_LISTEN_ADDRESS: &'static str = "0.0.0.0";
    pub const DEFAULT_LISTEN_PORT: u16 = 9633;
    pub const DEFAULT_LOG_LEVEL: &'static str = "info";
}
