/// Fixed-name transport helper emitted into every generation run. Generated
/// service clients import `createTwirpRequest`, `Fetch`, and
/// `throwTwirpError` from here.
pub const TWIRP_FILE_NAME: &str = "twirp.ts";

pub const TWIRP_SOURCE: &str = r#"export interface TwirpErrorJSON {
    code: string;
    msg: string;
    meta: {[index: string]: string};
}

export class TwirpError extends Error {
    code: string;
    meta: {[index: string]: string};

    constructor(te: TwirpErrorJSON) {
        super(te.msg);

        this.code = te.code;
        this.meta = te.meta;
    }
}

export const throwTwirpError = (resp: Response) => {
    return resp.json().then((err: TwirpErrorJSON) => { throw new TwirpError(err); })
};

export const createTwirpRequest = (url: string, body: object): Request => {
    return new Request(url, {
        method: "POST",
        headers: {
            "Content-Type": "application/json"
        },
        body: JSON.stringify(body)
    });
};

export type Fetch = (input: RequestInfo, init?: RequestInit) => Promise<Response>;
"#;
