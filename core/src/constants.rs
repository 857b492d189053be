// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

// Headers sent with every request.
pub const VERIDU_CLIENT: &str = "veridu-client";
// The service reads the session from `Veridy-Session`, note the `y`.
pub const VERIDU_SESSION: &str = "veridy-session";

// Env values used to configure the client.
pub const VERIDU_CLIENT_ID: &str = "VERIDU_CLIENT_ID";
pub const VERIDU_SECRET: &str = "VERIDU_SECRET";
pub const VERIDU_API_VERSION: &str = "VERIDU_API_VERSION";
pub const VERIDU_BASE_URL: &str = "VERIDU_BASE_URL";

/// Base url of the production service, without the version prefix.
pub const DEFAULT_BASE_URL: &str = "https://api.veridu.com";

/// Random bytes drawn per nonce; hex encoding doubles it on the wire.
pub const NONCE_LEN: usize = 10;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
