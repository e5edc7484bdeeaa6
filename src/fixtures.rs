#[cfg(test)]
pub mod test {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use crate::build::ConfigWriter;
    use crate::error::HttpdConfError;
    use crate::types::HttpdConfig;

    /// A minimal template exercising every record field.
    pub const TEST_TEMPLATE: &str = r#"
ServerAdmin {{ server_admin }}
DocumentRoot {{ app_root }}/{{ web_directory }}
FPMSocket {{ fpm_socket }}
DisableHTTPSRedirect {{ disable_https_redirect }}
{% if user_include != "" %}
IncludeOptional {{ user_include }}
{%- endif %}
"#;

    pub fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn default_config(app_root: &str) -> HttpdConfig {
        HttpdConfig {
            server_admin: "admin@localhost".into(),
            disable_https_redirect: false,
            app_root: app_root.into(),
            web_directory: "htdocs".into(),
            fpm_socket: "127.0.0.1:9000".into(),
            user_include: String::new(),
        }
    }

    /// Write `source` to `{cnb_dir}/config/httpd.conf`, the location the
    /// build step reads from, and return that path.
    pub fn write_template(cnb_dir: &Path, source: &str) -> PathBuf {
        let config_dir = cnb_dir.join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        let path = config_dir.join("httpd.conf");
        std::fs::write(&path, source).unwrap();
        path
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct WriteCall {
        pub layer_path: PathBuf,
        pub working_dir: PathBuf,
        pub cnb_path: PathBuf,
    }

    /// Records its calls and returns a canned result.
    pub struct FakeWriter {
        pub calls: RefCell<Vec<WriteCall>>,
        pub returns: Result<PathBuf, String>,
    }

    impl FakeWriter {
        pub fn returning(path: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                returns: Ok(PathBuf::from(path)),
            }
        }

        pub fn failing(reason: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                returns: Err(reason.to_string()),
            }
        }
    }

    impl ConfigWriter for FakeWriter {
        fn write(
            &self,
            layer_path: &Path,
            working_dir: &Path,
            cnb_path: &Path,
        ) -> Result<PathBuf, HttpdConfError> {
            self.calls.borrow_mut().push(WriteCall {
                layer_path: layer_path.to_path_buf(),
                working_dir: working_dir.to_path_buf(),
                cnb_path: cnb_path.to_path_buf(),
            });
            match &self.returns {
                Ok(path) => Ok(path.clone()),
                Err(reason) => Err(HttpdConfError::Io(std::io::Error::other(reason.clone()))),
            }
        }
    }
}
