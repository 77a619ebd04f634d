use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static SOURCE: &str = "
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
foo(let func if while var) { + += = == === -> . ? [1, 2.5] \"text\" } // note
";

static IDENTIFIERS: &str =
    "It was the year when they finally immanentized the Eschaton It was the year when they \
     finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton It was the year when \
     they finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton";

static COMMENTS: &str = "/// doc\n/* block /* nested */ */\n// line\n#!not a shebang\n\\\\ ## $\n";

static CANDIDATES: [(&str, &str); 3] = [
    ("identifiers", IDENTIFIERS),
    ("keywords_operators_and_punctuation", SOURCE),
    ("trivia", COMMENTS),
];

fn iterate(s: &str) {
    use explorer_syntax::SyntaxKind;
    use explorer_tokenizer::Tokenizer;

    let mut tokenizer = Tokenizer::new(s);

    loop {
        let token = tokenizer.next_token();
        if token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
