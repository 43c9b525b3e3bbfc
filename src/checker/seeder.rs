use crate::checker::speller::SpellingEngine;
use crate::checker::tokenizer::split_name;
use crate::model::DocTree;
use tracing::debug;

/// Common words dictionaries tend to lack but Ruby documentation uses.
///
/// Please keep this list sorted.
pub const DEFAULT_WORDS: &[&str] = &[
    "API",
    "ArgumentError",
    "CGI",
    "EOFError",
    "ERb",
    "Encoding::CompatibilityError",
    "Encoding::ConverterNotFoundError",
    "Encoding::InvalidByteSequenceError",
    "Encoding::UndefinedConversionError",
    "EncodingError",
    "Errno::E2BIG",
    "Errno::EACCES",
    "Errno::EADDRINUSE",
    "Errno::EADDRNOTAVAIL",
    "Errno::EAFNOSUPPORT",
    "Errno::EAGAIN",
    "Errno::EALREADY",
    "Errno::EAUTH",
    "Errno::EBADF",
    "Errno::EBADMSG",
    "Errno::EBADRPC",
    "Errno::EBUSY",
    "Errno::ECANCELED",
    "Errno::ECHILD",
    "Errno::ECONNABORTED",
    "Errno::ECONNREFUSED",
    "Errno::ECONNRESET",
    "Errno::EDEADLK",
    "Errno::EDESTADDRREQ",
    "Errno::EDOM",
    "Errno::EDQUOT",
    "Errno::EEXIST",
    "Errno::EFAULT",
    "Errno::EFBIG",
    "Errno::EFTYPE",
    "Errno::EHOSTDOWN",
    "Errno::EHOSTUNREACH",
    "Errno::EIDRM",
    "Errno::EILSEQ",
    "Errno::EINPROGRESS",
    "Errno::EINTR",
    "Errno::EINVAL",
    "Errno::EIO",
    "Errno::EISCONN",
    "Errno::EISDIR",
    "Errno::ELOOP",
    "Errno::EMFILE",
    "Errno::EMLINK",
    "Errno::EMSGSIZE",
    "Errno::EMULTIHOP",
    "Errno::ENAMETOOLONG",
    "Errno::ENEEDAUTH",
    "Errno::ENETDOWN",
    "Errno::ENETRESET",
    "Errno::ENETUNREACH",
    "Errno::ENFILE",
    "Errno::ENOATTR",
    "Errno::ENOBUFS",
    "Errno::ENODATA",
    "Errno::ENODEV",
    "Errno::ENOENT",
    "Errno::ENOEXEC",
    "Errno::ENOLCK",
    "Errno::ENOLINK",
    "Errno::ENOMEM",
    "Errno::ENOMSG",
    "Errno::ENOPROTOOPT",
    "Errno::ENOSPC",
    "Errno::ENOSR",
    "Errno::ENOSTR",
    "Errno::ENOSYS",
    "Errno::ENOTBLK",
    "Errno::ENOTCONN",
    "Errno::ENOTDIR",
    "Errno::ENOTEMPTY",
    "Errno::ENOTRECOVERABLE",
    "Errno::ENOTSOCK",
    "Errno::ENOTSUP",
    "Errno::ENOTTY",
    "Errno::ENXIO",
    "Errno::EOPNOTSUPP",
    "Errno::EOVERFLOW",
    "Errno::EOWNERDEAD",
    "Errno::EPERM",
    "Errno::EPFNOSUPPORT",
    "Errno::EPIPE",
    "Errno::EPROCLIM",
    "Errno::EPROCUNAVAIL",
    "Errno::EPROGMISMATCH",
    "Errno::EPROGUNAVAIL",
    "Errno::EPROTO",
    "Errno::EPROTONOSUPPORT",
    "Errno::EPROTOTYPE",
    "Errno::ERANGE",
    "Errno::EREMOTE",
    "Errno::EROFS",
    "Errno::ERPCMISMATCH",
    "Errno::ESHUTDOWN",
    "Errno::ESOCKTNOSUPPORT",
    "Errno::ESPIPE",
    "Errno::ESRCH",
    "Errno::ESTALE",
    "Errno::ETIME",
    "Errno::ETIMEDOUT",
    "Errno::ETOOMANYREFS",
    "Errno::ETXTBSY",
    "Errno::EUSERS",
    "Errno::EXDEV",
    "Errno::NOERROR",
    "Exception",
    "FIXME",
    "FiberError",
    "FileUtils",
    "FloatDomainError",
    "GPL",
    "IOError",
    "IndexError",
    "Interrupt",
    "KeyError",
    "LoadError",
    "LocalJumpError",
    "Math::DomainError",
    "NUL",
    "NameError",
    "NoMemoryError",
    "NoMethodError",
    "NotImplementedError",
    "PHP",
    "README",
    "RangeError",
    "RegexpError",
    "RuntimeError",
    "ScriptError",
    "SecurityError",
    "SignalException",
    "StandardError",
    "StopIteration",
    "StringIO",
    "SyntaxError",
    "SystemCallError",
    "SystemExit",
    "SystemStackError",
    "ThreadError",
    "TypeError",
    "URI",
    "VCS",
    "XHTML",
    "ZeroDivisionError",
    "Zlib",
    "accessor",
    "accessors",
    "argf",
    "argv",
    "ary",
    "baz",
    "bom",
    "cfg",
    "cpp",
    "crlf",
    "deprecations",
    "dev",
    "dup",
    "emacs",
    "env",
    "erb",
    "globals",
    "gsub",
    "http",
    "https",
    "img",
    "inlining",
    "instantiation",
    "irb",
    "iso",
    "ivar",
    "kbd",
    "klass",
    "klasses",
    "lang",
    "lexing",
    "lookup",
    "lossy",
    "mailto",
    "mktmpdir",
    "newb",
    "perl",
    "popup",
    "pwd",
    "racc",
    "rbw",
    "redistributions",
    "refactor",
    "refactored",
    "startup",
    "stderr",
    "stdin",
    "stdout",
    "struct",
    "succ",
    "sudo",
    "tmpdir",
    "tokenizer",
    "tokenizes",
    "txt",
    "unescape",
    "unescapes",
    "uniq",
    "unmaintained",
    "unordered",
    "untrusted",
    "utf",
    "validator",
    "validators",
    "visibilities",
    "www",
    "yacc",
];

/// Add the alphabetic runs of `name` to the session dictionary.
pub fn add_name(speller: &mut dyn SpellingEngine, name: &str) {
    for part in split_name(name) {
        speller.add_to_session(part);
    }
}

/// Seed the session dictionary with [`DEFAULT_WORDS`] and every name the
/// documentation tree defines: modules, their members, parameter lists and
/// file paths.
pub fn seed(speller: &mut dyn SpellingEngine, tree: &DocTree) {
    for word in DEFAULT_WORDS {
        add_name(speller, word);
    }

    for module in &tree.modules {
        add_name(speller, &module.name);

        for include in &module.includes {
            add_name(speller, &include.name);
        }
        for constant in &module.constants {
            add_name(speller, &constant.name);
        }
        for attribute in &module.attributes {
            add_name(speller, &attribute.name);
        }
        for method in &module.methods {
            add_name(speller, &method.name);
            if let Some(params) = &method.params {
                add_name(speller, params);
            }
            if let Some(block_params) = &method.block_params {
                add_name(speller, block_params);
            }
        }
        for alias in &module.aliases {
            add_name(speller, &alias.old_name);
            add_name(speller, &alias.new_name);
        }
    }

    for file in &tree.files {
        for part in file.location.absolute_name.split(['/', '\\', '.']) {
            add_name(speller, part);
        }
    }

    debug!(
        modules = tree.modules.len(),
        files = tree.files.len(),
        "seeded session dictionary"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::Dictionary;
    use crate::checker::speller::FstSpeller;
    use crate::model::{
        Alias, Attribute, ClassModule, Comment, Constant, FileLocation, Include, Method,
        ModuleKind, TopLevel,
    };

    fn speller() -> FstSpeller {
        let dictionary = Dictionary::from_words(["hello", "object"]).unwrap();
        FstSpeller::with_dictionary("en_US", dictionary).run_together(false)
    }

    fn file() -> FileLocation {
        FileLocation::new("/tmp/lib.rb")
    }

    fn object() -> ClassModule {
        ClassModule::new(ModuleKind::Class, "Object")
    }

    fn seeded(tree: &DocTree) -> FstSpeller {
        let mut speller = speller();
        seed(&mut speller, tree);
        speller
    }

    #[test]
    fn test_add_name_splits_underscores() {
        let mut speller = speller();
        add_name(&mut speller, "funkify_thingus");

        assert!(speller.check("funkify"), "funkify not added to wordlist");
        assert!(speller.check("thingus"), "thingus not added to wordlist");
    }

    #[test]
    fn test_add_name_tolerates_odd_names() {
        let mut speller = speller();
        add_name(&mut speller, "<=>");
        add_name(&mut speller, "");
        add_name(&mut speller, "Володя");

        assert!(speller.check("Володя"));
    }

    #[test]
    fn test_seed_defaults() {
        let speller = seeded(&DocTree::default());

        assert!(speller.check("API"));
        assert!(speller.check("Errno"));
        assert!(speller.check("ECONNREFUSED"));
        assert!(speller.check("klass"));
    }

    #[test]
    fn test_seed_class_name() {
        let mut tree = DocTree::default();
        tree.modules
            .push(ClassModule::new(ModuleKind::Class, "FunkifyThingus"));

        let speller = seeded(&tree);
        assert!(speller.check("FunkifyThingus"));
    }

    #[test]
    fn test_seed_members() {
        let mut module = object();
        module.includes.push(Include {
            name: "FUNKIFY_THINGUS".to_string(),
            comment: Comment::default(),
            file: file(),
        });
        module.constants.push(Constant {
            name: "BLORP_ZANT".to_string(),
            comment: Comment::default(),
            file: file(),
        });
        module.attributes.push(Attribute {
            name: "wuzzle".to_string(),
            rw: "RW".to_string(),
            comment: Comment::default(),
            file: file(),
        });
        module.aliases.push(Alias {
            old_name: "frob_it".to_string(),
            new_name: "new".to_string(),
            comment: Comment::default(),
            file: file(),
        });

        let mut tree = DocTree::default();
        tree.modules.push(module);
        let speller = seeded(&tree);

        for word in ["FUNKIFY", "THINGUS", "BLORP", "ZANT", "wuzzle", "frob"] {
            assert!(speller.check(word), "{} not added to wordlist", word);
        }
    }

    #[test]
    fn test_seed_method_params() {
        let mut module = object();
        module.methods.push(Method {
            name: "bagas_methd".to_string(),
            singleton: false,
            params: Some("(baz, hoge)".to_string()),
            block_params: Some("foo, bar".to_string()),
            comment: Comment::default(),
            file: file(),
        });

        let mut tree = DocTree::default();
        tree.modules.push(module);
        let speller = seeded(&tree);

        for word in ["bagas", "methd", "foo", "bar", "baz", "hoge"] {
            assert!(speller.check(word), "{} not added to wordlist", word);
        }
    }

    #[test]
    fn test_seed_file_paths() {
        let mut tree = DocTree::default();
        tree.files.push(TopLevel::new(FileLocation::new(
            "/home/quux/funkify_thingus.rb",
        )));

        let speller = seeded(&tree);

        assert!(speller.check("funkify"));
        assert!(speller.check("thingus"));
        assert!(speller.check("quux"));
    }
}
