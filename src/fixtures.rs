#[cfg(test)]
pub mod test {
    use crate::model::{
        AliasItem, Configuration, EnvVarItem, Ice, PathVarItem, PluginId, PluginItem,
        ZinitInit, ZshOptionItem,
    };

    /// `zsh-users/zsh-autosuggestions` loaded in turbo mode.
    pub fn sample_plugin() -> PluginItem {
        PluginItem {
            id: PluginId::from("zsh-users/zsh-autosuggestions"),
            name: "zsh-users/zsh-autosuggestions".into(),
            description: None,
            ice: Some(Ice {
                wait: Some(0),
                lucid: true,
                ..Ice::default()
            }),
        }
    }

    /// A configuration touching every section.
    pub fn full_config() -> Configuration {
        Configuration {
            zinit_init: ZinitInit::default(),
            aliases: vec![
                AliasItem {
                    name: "ll".into(),
                    alias: "ls -la".into(),
                    description: Some("list".into()),
                },
                AliasItem {
                    name: "gs".into(),
                    alias: "git status".into(),
                    description: None,
                },
            ],
            path_vars: vec![PathVarItem {
                name: "cargo".into(),
                path: "$HOME/.cargo/bin".into(),
            }],
            env_vars: vec![
                EnvVarItem {
                    key: "EDITOR".into(),
                    value: "nvim".into(),
                    group: Some("editor".into()),
                    plugin: None,
                },
                EnvVarItem {
                    key: "ZSH_AUTOSUGGEST_STRATEGY".into(),
                    value: "history completion".into(),
                    group: Some("zsh-users/zsh-autosuggestions".into()),
                    plugin: Some(PluginId::from("zsh-users/zsh-autosuggestions")),
                },
            ],
            plugins: vec![
                sample_plugin(),
                PluginItem {
                    id: PluginId::from("junegunn/fzf"),
                    name: "junegunn/fzf".into(),
                    description: Some("fuzzy finder".into()),
                    ice: Some(Ice {
                        from: Some("gh-r".into()),
                        r#as: Some("program".into()),
                        pick: Some("fzf".into()),
                        ..Ice::default()
                    }),
                },
            ],
            zsh_options: vec![ZshOptionItem {
                option: "setopt AUTO_CD".into(),
                description: Some("cd by typing a directory name".into()),
            }],
            init_script: "bindkey '^[[A' history-search-backward".into(),
            ..Configuration::default()
        }
    }

    #[test]
    fn full_config_is_already_normalized() {
        let value = serde_json::to_value(full_config()).unwrap();
        assert_eq!(crate::normalize::normalize(value), full_config());
    }
}
