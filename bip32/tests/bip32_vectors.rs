//! BIP32 test vectors 1-3 plus randomized path checks.

use faster_hex::hex_decode;
use kaspa_hdnode::{version, ChildNumber, CurveRegistry, DerivationPath, HDNode, NodeParams, PathCache, SECP256K1_NAME};
use rand::{thread_rng, Rng, RngCore};

fn seed(hex: &str) -> Vec<u8> {
    let mut seed = vec![0u8; hex.len() / 2];
    hex_decode(hex.as_bytes(), &mut seed).unwrap();
    seed
}

fn test_path(seed: &[u8], path: &str, expected_xprv: &str, expected_xpub: &str) {
    let registry = CurveRegistry::default();
    let path: DerivationPath = path.parse().unwrap();

    // batched
    let mut node = HDNode::from_seed(&registry, seed, SECP256K1_NAME).unwrap();
    node.derive_path(&path).unwrap();
    assert_eq!(node.serialize_private(version::XPRV).unwrap().as_str(), expected_xprv);
    assert_eq!(node.serialize_public(version::XPUB).unwrap(), expected_xpub);

    // one index at a time
    let mut stepped = HDNode::from_seed(&registry, seed, SECP256K1_NAME).unwrap();
    for child_number in path.iter() {
        stepped.derive(child_number).unwrap();
    }
    assert_eq!(stepped, node);

    // both encodings parse back
    let private = registry.deserialize(expected_xprv, version::XPUB, version::XPRV).unwrap();
    assert_eq!(private, node);
    let mut public = registry.deserialize(expected_xpub, version::XPUB, version::XPRV).unwrap();
    assert!(!public.has_private_key());
    assert_eq!(public.serialize_public(version::XPUB).unwrap(), expected_xpub);

    // a non-hardened last step is reproducible from the parent's public half
    if let Some(parent) = path.parent() {
        let last = path.iter().last().unwrap();
        if !last.is_hardened() {
            let mut parent_node = HDNode::from_seed(&registry, seed, SECP256K1_NAME).unwrap();
            parent_node.derive_path(&parent).unwrap();
            let xpub = parent_node.serialize_public(version::XPUB).unwrap();

            let mut neutered = registry.deserialize(&xpub, version::XPUB, version::XPRV).unwrap();
            neutered.derive(last).unwrap();
            assert_eq!(neutered.serialize_public(version::XPUB).unwrap(), expected_xpub);
        }
    }
}

#[test]
fn test_vector_1() {
    let seed = seed("000102030405060708090a0b0c0d0e0f");

    test_path(
        &seed,
        "m",
        "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi",
        "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8",
    );
    test_path(
        &seed,
        "m/0h",
        "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7",
        "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw",
    );
    test_path(
        &seed,
        "m/0h/1",
        "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs",
        "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ",
    );
    test_path(
        &seed,
        "m/0h/1/2h",
        "xprv9z4pot5VBttmtdRTWfWQmoH1taj2axGVzFqSb8C9xaxKymcFzXBDptWmT7FwuEzG3ryjH4ktypQSAewRiNMjANTtpgP4mLTj34bhnZX7UiM",
        "xpub6D4BDPcP2GT577Vvch3R8wDkScZWzQzMMUm3PWbmWvVJrZwQY4VUNgqFJPMM3No2dFDFGTsxxpG5uJh7n7epu4trkrX7x7DogT5Uv6fcLW5",
    );
    test_path(
        &seed,
        "m/0h/1/2h/2",
        "xprvA2JDeKCSNNZky6uBCviVfJSKyQ1mDYahRjijr5idH2WwLsEd4Hsb2Tyh8RfQMuPh7f7RtyzTtdrbdqqsunu5Mm3wDvUAKRHSC34sJ7in334",
        "xpub6FHa3pjLCk84BayeJxFW2SP4XRrFd1JYnxeLeU8EqN3vDfZmbqBqaGJAyiLjTAwm6ZLRQUMv1ZACTj37sR62cfN7fe5JnJ7dh8zL4fiyLHV",
    );
    test_path(
        &seed,
        "m/0h/1/2h/2/1000000000",
        "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76",
        "xpub6H1LXWLaKsWFhvm6RVpEL9P4KfRZSW7abD2ttkWP3SSQvnyA8FSVqNTEcYFgJS2UaFcxupHiYkro49S8yGasTvXEYBVPamhGW6cFJodrTHy",
    );
}

#[test]
fn test_vector_2() {
    let seed = seed(
        "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a2\
         9f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542",
    );

    test_path(
        &seed,
        "m",
        "xprv9s21ZrQH143K31xYSDQpPDxsXRTUcvj2iNHm5NUtrGiGG5e2DtALGdso3pGz6ssrdK4PFmM8NSpSBHNqPqm55Qn3LqFtT2emdEXVYsCzC2U",
        "xpub661MyMwAqRbcFW31YEwpkMuc5THy2PSt5bDMsktWQcFF8syAmRUapSCGu8ED9W6oDMSgv6Zz8idoc4a6mr8BDzTJY47LJhkJ8UB7WEGuduB",
    );
    test_path(
        &seed,
        "m/0",
        "xprv9vHkqa6EV4sPZHYqZznhT2NPtPCjKuDKGY38FBWLvgaDx45zo9WQRUT3dKYnjwih2yJD9mkrocEZXo1ex8G81dwSM1fwqWpWkeS3v86pgKt",
        "xpub69H7F5d8KSRgmmdJg2KhpAK8SR3DjMwAdkxj3ZuxV27CprR9LgpeyGmXUbC6wb7ERfvrnKZjXoUmmDznezpbZb7ap6r1D3tgFxHmwMkQTPH",
    );
    test_path(
        &seed,
        "m/0/2147483647h",
        "xprv9wSp6B7kry3Vj9m1zSnLvN3xH8RdsPP1Mh7fAaR7aRLcQMKTR2vidYEeEg2mUCTAwCd6vnxVrcjfy2kRgVsFawNzmjuHc2YmYRmagcEPdU9",
        "xpub6ASAVgeehLbnwdqV6UKMHVzgqAG8Gr6riv3Fxxpj8ksbH9ebxaEyBLZ85ySDhKiLDBrQSARLq1uNRts8RuJiHjaDMBU4Zn9h8LZNnBC5y4a",
    );
    test_path(
        &seed,
        "m/0/2147483647h/1",
        "xprv9zFnWC6h2cLgpmSA46vutJzBcfJ8yaJGg8cX1e5StJh45BBciYTRXSd25UEPVuesF9yog62tGAQtHjXajPPdbRCHuWS6T8XA2ECKADdw4Ef",
        "xpub6DF8uhdarytz3FWdA8TvFSvvAh8dP3283MY7p2V4SeE2wyWmG5mg5EwVvmdMVCQcoNJxGoWaU9DCWh89LojfZ537wTfunKau47EL2dhHKon",
    );
    test_path(
        &seed,
        "m/0/2147483647h/1/2147483646h",
        "xprvA1RpRA33e1JQ7ifknakTFpgNXPmW2YvmhqLQYMmrj4xJXXWYpDPS3xz7iAxn8L39njGVyuoseXzU6rcxFLJ8HFsTjSyQbLYnMpCqE2VbFWc",
        "xpub6ERApfZwUNrhLCkDtcHTcxd75RbzS1ed54G1LkBUHQVHQKqhMkhgbmJbZRkrgZw4koxb5JaHWkY4ALHY2grBGRjaDMzQLcgJvLJuZZvRcEL",
    );
    test_path(
        &seed,
        "m/0/2147483647h/1/2147483646h/2",
        "xprvA2nrNbFZABcdryreWet9Ea4LvTJcGsqrMzxHx98MMrotbir7yrKCEXw7nadnHM8Dq38EGfSh6dqA9QWTyefMLEcBYJUuekgW4BYPJcr9E7j",
        "xpub6FnCn6nSzZAw5Tw7cgR9bi15UV96gLZhjDstkXXxvCLsUXBGXPdSnLFbdpq8p9HmGsApME5hQTZ3emM2rnY5agb9rXpVGyy3bdW6EEgAtqt",
    );
}

#[test]
fn test_vector_3() {
    // leading zeros of the private key must be kept
    let seed = seed(
        "4b381541583be4423346c643850da4b320e46a87ae3d2a4e6da11eba819cd4ac\
         ba45d239319ac14f863b8d5ab5a0d0c64d2e8a1e7d1457df2e5a3c51c73235be",
    );

    test_path(
        &seed,
        "m",
        "xprv9s21ZrQH143K25QhxbucbDDuQ4naNntJRi4KUfWT7xo4EKsHt2QJDu7KXp1A3u7Bi1j8ph3EGsZ9Xvz9dGuVrtHHs7pXeTzjuxBrCmmhgC6",
        "xpub661MyMwAqRbcEZVB4dScxMAdx6d4nFc9nvyvH3v4gJL378CSRZiYmhRoP7mBy6gSPSCYk6SzXPTf3ND1cZAceL7SfJ1Z3GC8vBgp2epUt13",
    );
    test_path(
        &seed,
        "m/0h",
        "xprv9uPDJpEQgRQfDcW7BkF7eTya6RPxXeJCqCJGHuCJ4GiRVLzkTXBAJMu2qaMWPrS7AANYqdq6vcBcBUdJCVVFceUvJFjaPdGZ2y9WACViL4L",
        "xpub68NZiKmJWnxxS6aaHmn81bvJeTESw724CRDs6HbuccFQN9Ku14VQrADWgqbhhTHBaohPX4CjNLf9fq9MYo6oDaPPLPxSb7gwQN3ih19Zm4Y",
    );
}

#[test]
fn random_paths_match_repeated_derive() {
    let registry = CurveRegistry::default();
    let mut rng = thread_rng();
    let mut cache = PathCache::new();

    for _ in 0..16 {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let root = HDNode::from_seed(&registry, &seed, SECP256K1_NAME).unwrap();

        let len = rng.gen_range(1..=8);
        let path: Vec<ChildNumber> = (0..len)
            .map(|_| {
                let hardened = if rng.gen_bool(0.5) { ChildNumber::HARDENED_FLAG } else { 0 };
                ChildNumber(rng.gen_range(0..8) | hardened)
            })
            .collect();

        let mut batched = root.clone();
        batched.derive_path(&path).unwrap();

        let mut stepped = root.clone();
        for child_number in &path {
            stepped.derive(*child_number).unwrap();
        }

        let mut cached = root.clone();
        cached.derive_path_cached(&path, &mut cache).unwrap();

        assert_eq!(batched, stepped, "path {:?}", DerivationPath::from(path.clone()).to_string());
        assert_eq!(cached, stepped);
    }
}

#[test]
fn random_public_paths_match_private_paths() {
    let registry = CurveRegistry::default();
    let mut rng = thread_rng();

    for _ in 0..8 {
        let mut seed = [0u8; 64];
        rng.fill_bytes(&mut seed);
        let root = HDNode::from_seed(&registry, &seed, SECP256K1_NAME).unwrap();
        let path: Vec<ChildNumber> =
            (0..rng.gen_range(1..=5)).map(|_| ChildNumber(rng.gen_range(0..ChildNumber::HARDENED_FLAG))).collect();

        let mut private = root.clone();
        private.derive_path(&path).unwrap();

        let mut public = HDNode::new(
            &registry,
            NodeParams { chain_code: Some(*root.chain_code()), public_key: Some(root.public_key().unwrap()), ..Default::default() },
        )
        .unwrap();
        public.derive_path(&path).unwrap();

        assert!(!public.has_private_key());
        assert_eq!(public.public_key().unwrap(), private.public_key().unwrap());
        assert_eq!(public.chain_code(), private.chain_code());
        assert_eq!(public.fingerprint(), private.fingerprint());
    }
}
